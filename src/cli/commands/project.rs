//! project commands - manage deployable projects
//!
//! `create` and `update` lean on [`crate::resolve::project`] to turn a
//! directory, a `user/repo[@branch]` spec, or a literal URL into a
//! fully-specified payload before anything is sent.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde_json::json;

use crate::api::{decode, Api};
use crate::cli::Context;
use crate::core::types::{DeployStatus, DeployToken, Project};
use crate::resolve::envfile;
use crate::resolve::project::{
    self as resolve, ProjectPayload, ProjectUpdate, ResolvedRemote,
};
use crate::ui::output;
use crate::ui::prompts::Prompter;

/// List projects, optionally filtered by name.
pub async fn list(api: &dyn Api, filter: Option<&str>) -> Result<()> {
    let result = api.list("project", filter).await?;
    output::print_table(
        &result,
        &[
            ("Name", "name"),
            ("Remote", "remote"),
            ("Branch", "branch"),
            ("Key", "key"),
            ("Updated", "updated_at"),
        ],
    );
    Ok(())
}

/// Show project details, or its secrets with `--secrets`.
pub async fn view(ctx: &Context, api: &dyn Api, name: &str, secrets: bool, web: bool) -> Result<()> {
    if secrets {
        let result = api.get(&format!("secret/{}", name)).await?;
        output::print(format!("Secrets for {}", name), ctx.verbosity);
        output::print_table(
            &result,
            &[("Key", "key"), ("Value", "value"), ("Updated", "updated_at")],
        );
    } else {
        let result = api.get(&format!("project/{}", name)).await?;
        output::print_kv(&result);
    }

    if web {
        let url = ctx.config.api_url.clone();
        output::print(format!("Opening {} ..", url), ctx.verbosity);
        open::that(&url).context("failed to open browser")?;
    }
    Ok(())
}

/// Create a project.
pub async fn create(
    ctx: &Context,
    api: &dyn Api,
    prompter: &dyn Prompter,
    name: Option<&str>,
    remote: Option<String>,
    branch: Option<String>,
    key: Option<String>,
) -> Result<()> {
    let remote_arg = match remote {
        Some(remote) => remote,
        None => prompter.text("Git remote", None)?,
    };
    if remote_arg.is_empty() {
        bail!("no remote found");
    }

    let ResolvedRemote {
        remote,
        branch,
        from_git_config,
    } = resolve::resolve_remote(&remote_arg, branch)?;
    if from_git_config {
        output::print(format!("found remote origin: {}", remote), ctx.verbosity);
    }

    let key = match key {
        Some(key) => Some(key),
        None => {
            let selected = resolve::select_key(api, prompter).await?;
            if selected.is_none() {
                output::warn("no authentication keys found, skipping key selection", ctx.verbosity);
            }
            selected
        }
    };

    let payload = ProjectPayload {
        name: resolve::project_name(name),
        remote,
        branch,
        key,
    };

    let result = api
        .create("project", serde_json::to_value(&payload)?)
        .await?;
    let created: Project = decode(result.clone())?;
    output::success(format!("created project {}", created.name), ctx.verbosity);
    output::print_kv(&result);
    Ok(())
}

/// Update project metadata and/or push, remove, and import secrets.
///
/// Metadata goes in one call; each secret is its own call, reported as
/// it completes, in the order given.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    ctx: &Context,
    api: &dyn Api,
    name: &str,
    remote: Option<String>,
    branch: Option<String>,
    key: Option<String>,
    set: &[String],
    unset: &[String],
    import_env: Option<&Path>,
) -> Result<()> {
    if remote.is_none()
        && branch.is_none()
        && key.is_none()
        && set.is_empty()
        && unset.is_empty()
        && import_env.is_none()
    {
        bail!("nothing to update; see 'ccd project update --help'");
    }

    let mut metadata = ProjectUpdate {
        branch,
        key,
        ..Default::default()
    };
    if let Some(remote_arg) = remote {
        let resolved = resolve::resolve_remote(&remote_arg, metadata.branch.take())?;
        metadata.remote = Some(resolved.remote);
        metadata.branch = resolved.branch;
    }

    if !metadata.is_empty() {
        output::print(format!("Updating project {}", name), ctx.verbosity);
        let result = api
            .update(&format!("project/{}", name), serde_json::to_value(&metadata)?)
            .await?;
        output::print_kv(&result);
    }

    for pair in set {
        // Malformed pairs are skipped, the rest of the batch continues.
        let Some((key, value)) = pair.split_once('=') else {
            output::warn(
                format!("skipping '{}': expected KEY=VALUE", pair),
                ctx.verbosity,
            );
            continue;
        };
        api.update(
            &format!("secret/{}", name),
            json!({"key": key.to_uppercase(), "value": value}),
        )
        .await?;
        output::success(key.to_uppercase(), ctx.verbosity);
    }

    for key in unset {
        api.delete(&format!("secret/{}/{}", name, key)).await?;
        output::success(format!("removed {}", key), ctx.verbosity);
    }

    if let Some(path) = import_env {
        output::print(format!("importing {}", path.display()), ctx.verbosity);
        for (key, value) in envfile::load(path)? {
            api.update(
                &format!("secret/{}", name),
                json!({"key": key, "value": value}),
            )
            .await?;
            output::success(key, ctx.verbosity);
        }
    }

    Ok(())
}

/// Delete a project, selecting one interactively when no name was given.
pub async fn delete(
    ctx: &Context,
    api: &dyn Api,
    prompter: &dyn Prompter,
    name: Option<&str>,
) -> Result<()> {
    let name = match name {
        Some(name) => name.to_string(),
        None => {
            let projects: Vec<Project> = decode(api.get("project").await?)?;
            if projects.is_empty() {
                bail!("no projects found");
            }
            let names: Vec<String> = projects.into_iter().map(|p| p.name).collect();
            let choice = prompter.select("Select a project for removal", &names)?;
            names[choice].clone()
        }
    };

    output::print(format!("Deleting project {}", name), ctx.verbosity);
    let result = api.delete(&format!("project/{}", name)).await?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}

/// Deployment actions: start (default), stop, status, logs.
pub async fn deploy(
    ctx: &Context,
    api: &dyn Api,
    name: &str,
    _start: bool,
    stop: bool,
    status: bool,
    logs: bool,
) -> Result<()> {
    if status || logs {
        let snapshot: DeployStatus =
            decode(api.get(&format!("deploy/{}/status", name)).await?)?;
        if status {
            print_containers(&snapshot);
        }
        if logs {
            print_logs(&snapshot);
        }
        return Ok(());
    }

    let action = if stop { "stop" } else { "start" };
    let result = api.get(&format!("deploy/{}/{}", name, action)).await?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}

/// Show deployment status and logs for a project.
pub async fn status(api: &dyn Api, name: &str) -> Result<()> {
    let snapshot: DeployStatus =
        decode(api.get(&format!("project/{}/status", name)).await?)?;
    print_containers(&snapshot);
    print_logs(&snapshot);
    Ok(())
}

/// Regenerate the deploy token and print the webhook line for it.
pub async fn refresh_token(ctx: &Context, api: &dyn Api, name: &str) -> Result<()> {
    let result = api.get(&format!("project/{}/refresh-token", name)).await?;
    let token: DeployToken = decode(result)?;

    output::print(format!("New deploy token for {}", name), ctx.verbosity);
    println!("{}", token.token);
    output::print(
        format!(
            "curl -X POST {}/webhook/project/{}",
            ctx.config.api_url, token.token
        ),
        ctx.verbosity,
    );
    Ok(())
}

fn print_containers(snapshot: &DeployStatus) {
    let rows: Vec<serde_json::Value> = snapshot
        .ps
        .iter()
        .map(|c| {
            json!({
                "name": c.name,
                "image": c.image,
                "state": c.state,
                "status": c.status,
            })
        })
        .collect();
    output::print_table(
        &serde_json::Value::Array(rows),
        &[
            ("Name", "name"),
            ("Image", "image"),
            ("State", "state"),
            ("Status", "status"),
        ],
    );
}

fn print_logs(snapshot: &DeployStatus) {
    if let Some(logs) = &snapshot.logs {
        for line in logs.lines() {
            println!("{}", line);
        }
    }
}
