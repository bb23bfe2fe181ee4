//! resolve::project
//!
//! Remote, name, and key resolution for project create/update.
//!
//! # Remote resolution
//!
//! The `--remote` argument accepts three spellings:
//!
//! 1. A local directory: the checkout's `remote "origin"` URL is used.
//! 2. A `user/repo[@branch]` spec: canonicalized to
//!    `git@github.com:user/repo.git`; the embedded branch applies only
//!    when no explicit `--branch` was given.
//! 3. Anything else: passed through verbatim.
//!
//! An empty result is a local error - project creation never reaches
//! the platform without a remote.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::api::{decode, Api};
use crate::core::types::AuthKey;
use crate::ui::prompts::Prompter;

/// `user/repo` optionally suffixed with `@branch`.
static GITHUB_REPO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<user>[\w-]+)/(?P<repo>[\w-]+)(?:@(?P<branch>[\w./-]+))?$")
        .expect("repo pattern compiles")
});

/// Errors from remote resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("no git remote found for '{0}'")]
    NoRemote(String),
}

/// Outcome of remote resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRemote {
    /// Fully-specified remote URL.
    pub remote: String,
    /// Branch, when one was supplied or embedded in the spec.
    pub branch: Option<String>,
    /// Whether the remote came out of a local checkout's git config.
    pub from_git_config: bool,
}

/// Payload for `POST project`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPayload {
    pub name: Option<String>,
    pub remote: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Payload for `PUT project/<name>`; only supplied fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ProjectUpdate {
    /// True when no metadata field is set.
    pub fn is_empty(&self) -> bool {
        self.remote.is_none() && self.branch.is_none() && self.key.is_none()
    }
}

/// Resolve a remote argument into a fully-specified remote plus branch.
///
/// The explicit `branch` always wins over one embedded in the spec.
pub fn resolve_remote(arg: &str, branch: Option<String>) -> Result<ResolvedRemote, RemoteError> {
    if Path::new(arg).is_dir() {
        return match remote_from_git_dir(Path::new(arg)) {
            Some(remote) => Ok(ResolvedRemote {
                remote,
                branch,
                from_git_config: true,
            }),
            None => Err(RemoteError::NoRemote(arg.to_string())),
        };
    }

    let (remote, branch) = parse_remote(arg, branch);
    if remote.is_empty() {
        return Err(RemoteError::NoRemote(arg.to_string()));
    }
    Ok(ResolvedRemote {
        remote,
        branch,
        from_git_config: false,
    })
}

/// Canonicalize a `user/repo[@branch]` spec; other specs pass through.
pub fn parse_remote(remote: &str, branch: Option<String>) -> (String, Option<String>) {
    match GITHUB_REPO_PATTERN.captures(remote) {
        Some(caps) => {
            let canonical = format!("git@github.com:{}/{}.git", &caps["user"], &caps["repo"]);
            let branch = branch.or_else(|| caps.name("branch").map(|m| m.as_str().to_string()));
            (canonical, branch)
        }
        None => (remote.to_string(), branch),
    }
}

/// Read the `origin` remote URL from a local checkout.
///
/// Returns the URL verbatim, or `None` when the directory is not a
/// repository or has no origin remote.
pub fn remote_from_git_dir(path: &Path) -> Option<String> {
    let repo = git2::Repository::open(path).ok()?;
    let remote = repo.find_remote("origin").ok()?;
    remote.url().map(str::to_string)
}

/// Resolve the project name argument.
///
/// `.` means "name it after the current directory"; path separators
/// are flattened so the name stays a single collection-level segment.
pub fn project_name(arg: Option<&str>) -> Option<String> {
    let cwd = std::env::current_dir().unwrap_or_default();
    project_name_in(arg, &cwd)
}

fn project_name_in(arg: Option<&str>, cwd: &Path) -> Option<String> {
    let raw = match arg {
        Some(".") => cwd.file_name()?.to_string_lossy().to_string(),
        Some(name) => name.to_string(),
        None => return None,
    };
    Some(raw.replace('/', "-"))
}

/// Pick an auth key for a new project.
///
/// With at least one key stored remotely, the user selects one by
/// name; with none, key assignment is skipped silently and the
/// returned value is `None`.
pub async fn select_key(
    api: &dyn Api,
    prompter: &dyn Prompter,
) -> anyhow::Result<Option<String>> {
    let keys: Vec<AuthKey> = decode(api.get("auth").await?)?;
    if keys.is_empty() {
        return Ok(None);
    }
    let names: Vec<String> = keys.into_iter().map(|k| k.name).collect();
    let choice = prompter.select("Select a git key", &names)?;
    Ok(names.into_iter().nth(choice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn spec_is_canonicalized() {
        let (remote, branch) = parse_remote("org/repo", None);
        assert_eq!(remote, "git@github.com:org/repo.git");
        assert_eq!(branch, None);
    }

    #[test]
    fn embedded_branch_is_used_when_no_flag_given() {
        let (remote, branch) = parse_remote("org/repo@dev", None);
        assert_eq!(remote, "git@github.com:org/repo.git");
        assert_eq!(branch.as_deref(), Some("dev"));
    }

    #[test]
    fn explicit_branch_wins_over_embedded() {
        let (_, branch) = parse_remote("org/repo@dev", Some("main".to_string()));
        assert_eq!(branch.as_deref(), Some("main"));
    }

    #[test]
    fn non_spec_remotes_pass_through() {
        let url = "https://gitlab.example.com/org/repo.git";
        let (remote, branch) = parse_remote(url, None);
        assert_eq!(remote, url);
        assert_eq!(branch, None);

        let ssh = "git@github.com:org/repo.git";
        assert_eq!(parse_remote(ssh, None).0, ssh);
    }

    #[test]
    fn resolve_rejects_empty_remote() {
        let err = resolve_remote("", None).unwrap_err();
        assert_eq!(err, RemoteError::NoRemote(String::new()));
    }

    #[test]
    fn directory_without_repo_has_no_remote() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = resolve_remote(dir.path().to_str().unwrap(), None).unwrap_err();
        assert!(matches!(err, RemoteError::NoRemote(_)));
    }

    #[test]
    fn directory_with_origin_resolves_verbatim() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        repo.remote("origin", "git@github.com:org/checkout.git")
            .unwrap();

        let resolved = resolve_remote(dir.path().to_str().unwrap(), None).unwrap();
        assert_eq!(resolved.remote, "git@github.com:org/checkout.git");
        assert!(resolved.from_git_config);
        assert_eq!(resolved.branch, None);
    }

    #[test]
    fn repo_without_origin_has_no_remote() {
        let dir = tempfile::TempDir::new().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        let err = resolve_remote(dir.path().to_str().unwrap(), None).unwrap_err();
        assert!(matches!(err, RemoteError::NoRemote(_)));
    }

    #[test]
    fn dot_names_after_directory() {
        let name = project_name_in(Some("."), Path::new("/work/myapp"));
        assert_eq!(name.as_deref(), Some("myapp"));
    }

    #[test]
    fn slashes_flatten_to_dashes() {
        let name = project_name_in(Some("team/app"), Path::new("/work"));
        assert_eq!(name.as_deref(), Some("team-app"));
    }

    #[test]
    fn update_payload_skips_absent_fields() {
        let update = ProjectUpdate {
            branch: Some("main".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"branch": "main"}));
    }

    proptest! {
        /// Every valid spec canonicalizes, and the branch is derived
        /// exactly once: the flag when present, the spec's otherwise.
        #[test]
        fn spec_canonicalization_holds(
            user in "[A-Za-z0-9_-]{1,16}",
            repo in "[A-Za-z0-9_-]{1,16}",
            branch in proptest::option::of("[a-z][a-z0-9]{0,8}"),
            flag in proptest::option::of("[a-z][a-z0-9]{0,8}"),
        ) {
            let spec = match &branch {
                Some(b) => format!("{}/{}@{}", user, repo, b),
                None => format!("{}/{}", user, repo),
            };
            let (remote, resolved) = parse_remote(&spec, flag.clone());
            prop_assert_eq!(remote, format!("git@github.com:{}/{}.git", user, repo));
            prop_assert_eq!(resolved, flag.or(branch));
        }
    }
}
