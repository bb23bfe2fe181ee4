//! page commands - static pages and their deploy workflow

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde_json::json;

use crate::api::{decode, Api};
use crate::cli::Context;
use crate::core::types::{DeployToken, Page};
use crate::resolve::page as resolve;
use crate::ui::output;
use crate::ui::prompts::Prompter;

/// List pages.
pub async fn list(api: &dyn Api) -> Result<()> {
    let result = api.get("page").await?;
    output::print_table(&result, &[("FQDN", "fqdn"), ("Updated", "updated_at")]);
    Ok(())
}

/// Show page details.
pub async fn view(api: &dyn Api, fqdn: &str) -> Result<()> {
    let result = api.get(&format!("page/{}", fqdn)).await?;
    output::print_kv(&result);
    Ok(())
}

/// Create a page, optionally with CORS hosts and redirects to it.
///
/// Each redirect is its own call, attempted even when an earlier one
/// reported a problem in its result body.
pub async fn create(
    ctx: &Context,
    api: &dyn Api,
    fqdn: &str,
    cors_hosts: &[String],
    redirects: &[String],
) -> Result<()> {
    output::print(format!("Creating page {}", fqdn), ctx.verbosity);
    let hosts = if cors_hosts.is_empty() {
        None
    } else {
        Some(cors_hosts.join(","))
    };
    let result = api
        .create("page", json!({"fqdn": fqdn, "cors_hosts": hosts}))
        .await?;
    output::print_result(&result, ctx.verbosity);

    for source in redirects {
        output::print(format!("Redirect: {} -> {}", source, fqdn), ctx.verbosity);
        let result = api
            .create(
                "redirect",
                json!({"source": source, "destination": fqdn}),
            )
            .await?;
        output::print_result(&result, ctx.verbosity);
    }
    Ok(())
}

/// Delete a page, selecting one interactively when no FQDN was given.
pub async fn delete(
    ctx: &Context,
    api: &dyn Api,
    prompter: &dyn Prompter,
    fqdn: Option<&str>,
) -> Result<()> {
    let fqdn = match fqdn {
        Some(fqdn) => fqdn.to_string(),
        None => {
            let pages: Vec<Page> = decode(api.get("page").await?)?;
            if pages.is_empty() {
                bail!("no pages found");
            }
            let names: Vec<String> = pages.into_iter().map(|p| p.fqdn).collect();
            let choice = prompter.select("Select a page for removal", &names)?;
            names[choice].clone()
        }
    };

    output::print(format!("Deleting page {}", fqdn), ctx.verbosity);
    let result = api.delete(&format!("page/{}", fqdn)).await?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}

/// Regenerate the page's deploy token. The previous token stops
/// working immediately.
pub async fn refresh_token(ctx: &Context, api: &dyn Api, fqdn: &str) -> Result<()> {
    let result = api.get(&format!("page/{}/refresh-token", fqdn)).await?;
    let token: DeployToken = decode(result)?;
    output::print(format!("New deploy token for {}", fqdn), ctx.verbosity);
    println!("{}", token.token);
    Ok(())
}

/// Deploy an artifact to a page.
///
/// The artifact must be a regular file; the check runs before any
/// upload call.
pub async fn deploy(
    ctx: &Context,
    api: &dyn Api,
    fqdn: &str,
    path: &Path,
    view: bool,
) -> Result<()> {
    let bytes = resolve::read_payload(path)?;

    output::print(format!("Deploying page {}", fqdn), ctx.verbosity);
    api.upload(&format!("upload/{}", fqdn), bytes).await?;

    let url = format!("https://{}/", fqdn);
    output::success(format!("deployed {}", url), ctx.verbosity);
    if view {
        open::that(&url).context("failed to open browser")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::Verb;
    use crate::api::MockApi;
    use crate::ui::prompts::ScriptedPrompter;

    fn test_ctx() -> Context {
        Context {
            config: crate::core::config::CliConfig::default(),
            config_path: std::path::PathBuf::new(),
            interactive: false,
            verbosity: crate::ui::output::Verbosity::Quiet,
        }
    }

    #[tokio::test]
    async fn create_joins_cors_hosts() {
        let api = MockApi::new();
        api.push_response(json!({}));
        create(
            &test_ctx(),
            &api,
            "example.com",
            &["a.example.com".to_string(), "b.example.com".to_string()],
            &[],
        )
        .await
        .unwrap();

        assert_eq!(
            api.calls()[0].body,
            Some(json!({
                "fqdn": "example.com",
                "cors_hosts": "a.example.com,b.example.com"
            }))
        );
    }

    #[tokio::test]
    async fn create_issues_one_call_per_redirect() {
        let api = MockApi::new();
        create(
            &test_ctx(),
            &api,
            "example.com",
            &[],
            &["www.example.com".to_string(), "old.example.com".to_string()],
        )
        .await
        .unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1].path, "redirect");
        assert_eq!(
            calls[1].body,
            Some(json!({"source": "www.example.com", "destination": "example.com"}))
        );
        assert_eq!(
            calls[2].body,
            Some(json!({"source": "old.example.com", "destination": "example.com"}))
        );
    }

    #[tokio::test]
    async fn deploy_uploads_file_bytes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("payload.tar");
        std::fs::write(&path, b"bytes").unwrap();

        let api = MockApi::new();
        deploy(&test_ctx(), &api, "example.com", &path, false)
            .await
            .unwrap();

        let calls = api.calls();
        assert_eq!(calls[0].verb, Verb::Upload);
        assert_eq!(calls[0].path, "upload/example.com");
        assert_eq!(calls[0].raw.as_deref(), Some(&b"bytes"[..]));
    }

    #[tokio::test]
    async fn deploy_rejects_directories_before_uploading() {
        let dir = tempfile::TempDir::new().unwrap();
        let api = MockApi::new();

        let err = deploy(&test_ctx(), &api, "example.com", dir.path(), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("directory"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_selects_interactively() {
        let api = MockApi::new();
        api.push_response(json!([{"fqdn": "a.com"}, {"fqdn": "b.com"}]));
        api.push_response(json!({}));

        let prompter = ScriptedPrompter::new();
        prompter.push_selection(0);

        delete(&test_ctx(), &api, &prompter, None).await.unwrap();
        assert_eq!(api.calls()[1].path, "page/a.com");
    }
}
