//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Resolves missing input (resolvers, interactive selection)
//! 3. Calls the platform through the [`Api`] trait
//! 4. Hands the result to the output layer
//!
//! Handlers never terminate the process; errors flow back to `main`.
//! Multi-call commands issue their calls strictly in order and stop at
//! the first fatal error; locally-invalid batch items are skipped with
//! a warning instead.

mod auth;
mod cli_cmd;
mod completion;
mod config_cmd;
mod env_cmd;
mod page;
mod project;
mod redirect;

// Re-export command functions for testing and direct invocation
pub use auth::{
    create as auth_create, delete as auth_delete, list as auth_list, view as auth_view,
};
pub use cli_cmd::{list as cli_list, set as cli_set};
pub use completion::completion;
pub use config_cmd::{list as config_list, set as config_set, unset as config_unset};
pub use env_cmd::{
    create as env_create, delete as env_delete, import as env_import, list as env_list,
    set as env_set, unset as env_unset, view as env_view,
};
pub use page::{
    create as page_create, delete as page_delete, deploy as page_deploy, list as page_list,
    refresh_token as page_refresh_token, view as page_view,
};
pub use project::{
    create as project_create, delete as project_delete, deploy as project_deploy,
    list as project_list, refresh_token as project_refresh_token, status as project_status,
    update as project_update, view as project_view,
};
pub use redirect::{
    create as redirect_create, delete as redirect_delete, list as redirect_list,
    update as redirect_update,
};

use anyhow::Result;

use crate::api::{Api, HttpApi};
use crate::cli::args::{
    AuthAction, CliAction, Command, ConfigAction, EnvAction, PageAction, ProjectAction,
    RedirectAction,
};
use crate::cli::Context;
use crate::ui::prompts::{Prompter, TerminalPrompter};

/// Dispatch a command to its handler.
pub async fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    // Local commands need neither the platform client nor a prompter.
    match command {
        Command::Cli(action) => {
            return match action {
                CliAction::List => cli_cmd::list(ctx),
                CliAction::Set { key, value } => cli_cmd::set(ctx, &key, &value),
            }
        }
        Command::Completion { shell } => return completion::completion(shell),
        _ => {}
    }

    let api = HttpApi::new(ctx.config.api_url.as_str(), ctx.config.api_key.as_str());
    let prompter = TerminalPrompter::new(ctx.interactive);
    dispatch_remote(command, ctx, &api, &prompter).await
}

/// Dispatch a platform-backed command against explicit collaborators.
///
/// Split out from [`dispatch`] so tests can drive commands with a mock
/// API and a scripted prompter.
pub async fn dispatch_remote(
    command: Command,
    ctx: &Context,
    api: &dyn Api,
    prompter: &dyn Prompter,
) -> Result<()> {
    match command {
        Command::Cli(_) | Command::Completion { .. } => unreachable!("handled locally"),

        Command::Config(action) => match action {
            ConfigAction::List => config_cmd::list(api).await,
            ConfigAction::Set { key, value } => config_cmd::set(ctx, api, &key, &value).await,
            ConfigAction::Unset { key } => config_cmd::unset(ctx, api, &key).await,
        },

        Command::Auth(action) => match action {
            AuthAction::List { filter } => auth::list(api, filter.as_deref()).await,
            AuthAction::View { name } => auth::view(api, &name).await,
            AuthAction::Create {
                name,
                ssh,
                pat,
                import,
            } => auth::create(api, prompter, name, ssh, pat, import.as_deref()).await,
            AuthAction::Delete { name } => {
                auth::delete(ctx, api, prompter, name.as_deref()).await
            }
        },

        Command::Project(action) => match action {
            ProjectAction::List { filter } => project::list(api, filter.as_deref()).await,
            ProjectAction::View { name, secrets, web } => {
                project::view(ctx, api, &name, secrets, web).await
            }
            ProjectAction::Create {
                name,
                remote,
                branch,
                key,
            } => {
                project::create(ctx, api, prompter, name.as_deref(), remote, branch, key).await
            }
            ProjectAction::Update {
                name,
                remote,
                branch,
                key,
                set,
                unset,
                import_env,
            } => {
                project::update(
                    ctx,
                    api,
                    &name,
                    remote,
                    branch,
                    key,
                    &set,
                    &unset,
                    import_env.as_deref(),
                )
                .await
            }
            ProjectAction::Delete { name } => {
                project::delete(ctx, api, prompter, name.as_deref()).await
            }
            ProjectAction::Deploy {
                name,
                start,
                stop,
                status,
                logs,
            } => project::deploy(ctx, api, &name, start, stop, status, logs).await,
            ProjectAction::Status { name } => project::status(api, &name).await,
            ProjectAction::RefreshToken { name } => {
                project::refresh_token(ctx, api, &name).await
            }
        },

        Command::Env(action) => match action {
            EnvAction::List { project } => env_cmd::list(api, &project).await,
            EnvAction::Create {
                project,
                name,
                branch,
            } => env_cmd::create(ctx, api, &project, &name, branch).await,
            EnvAction::View {
                project,
                environment,
            } => env_cmd::view(api, &project, &environment).await,
            EnvAction::Delete {
                project,
                environment,
            } => env_cmd::delete(ctx, api, &project, &environment).await,
            EnvAction::Set {
                project,
                environment,
                key,
                value,
            } => env_cmd::set(ctx, api, &project, &environment, &key, &value).await,
            EnvAction::Unset {
                project,
                environment,
                key,
            } => env_cmd::unset(ctx, api, &project, &environment, &key).await,
            EnvAction::Import {
                project,
                environment,
                file,
            } => env_cmd::import(ctx, api, &project, &environment, &file).await,
        },

        Command::Page(action) => match action {
            PageAction::List => page::list(api).await,
            PageAction::View { fqdn } => page::view(api, &fqdn).await,
            PageAction::Create {
                fqdn,
                cors_hosts,
                redirects,
            } => page::create(ctx, api, &fqdn, &cors_hosts, &redirects).await,
            PageAction::Delete { fqdn } => {
                page::delete(ctx, api, prompter, fqdn.as_deref()).await
            }
            PageAction::RefreshToken { fqdn } => page::refresh_token(ctx, api, &fqdn).await,
            PageAction::Deploy { fqdn, path, view } => {
                page::deploy(ctx, api, &fqdn, &path, view).await
            }
        },

        Command::Redirect(action) => match action {
            RedirectAction::List => redirect::list(api).await,
            RedirectAction::Create {
                source,
                destination,
            } => redirect::create(ctx, api, &source, &destination).await,
            RedirectAction::Update {
                source,
                destination,
            } => redirect::update(ctx, api, &source, &destination).await,
            RedirectAction::Delete { source } => redirect::delete(ctx, api, &source).await,
        },
    }
}
