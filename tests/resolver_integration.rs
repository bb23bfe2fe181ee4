//! Integration tests for resolver + command sequences.
//!
//! Commands run against the recording [`MockApi`] and the scripted
//! prompter, so each test can assert the exact calls a command issued
//! and that local validation failures never reach the platform.

use std::path::PathBuf;

use ccd::api::mock::Verb;
use ccd::api::MockApi;
use ccd::cli::commands;
use ccd::cli::Context;
use ccd::core::config::CliConfig;
use ccd::ui::output::Verbosity;
use ccd::ui::prompts::{PromptError, ScriptedPrompter};
use serde_json::json;

fn quiet_ctx() -> Context {
    Context {
        config: CliConfig::default(),
        config_path: PathBuf::new(),
        interactive: false,
        verbosity: Verbosity::Quiet,
    }
}

// =============================================================================
// Project creation
// =============================================================================

#[tokio::test]
async fn project_create_from_spec_with_no_keys_skips_prompt() {
    let ctx = quiet_ctx();
    let api = MockApi::new();
    // Key selection fetches the key list; none exist.
    api.push_response(json!([]));
    api.push_response(json!({"name": "myapp", "remote": "git@github.com:org/repo.git"}));

    // A prompter with nothing scripted: any prompt would fail the test.
    let prompter = ScriptedPrompter::new();

    commands::project_create(
        &ctx,
        &api,
        &prompter,
        Some("myapp"),
        Some("org/repo@dev".to_string()),
        None,
        None,
    )
    .await
    .unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].verb, Verb::Get);
    assert_eq!(calls[0].path, "auth");
    assert_eq!(calls[1].verb, Verb::Create);
    assert_eq!(calls[1].path, "project");
    // Branch derived from the spec exactly once; key omitted entirely.
    assert_eq!(
        calls[1].body,
        Some(json!({
            "name": "myapp",
            "remote": "git@github.com:org/repo.git",
            "branch": "dev"
        }))
    );
}

#[tokio::test]
async fn project_create_explicit_branch_wins_over_embedded() {
    let ctx = quiet_ctx();
    let api = MockApi::new();
    api.push_response(json!([]));
    api.push_response(json!({"name": "myapp", "remote": "git@github.com:org/repo.git"}));

    let prompter = ScriptedPrompter::new();
    commands::project_create(
        &ctx,
        &api,
        &prompter,
        Some("myapp"),
        Some("org/repo@dev".to_string()),
        Some("main".to_string()),
        None,
    )
    .await
    .unwrap();

    let body = api.calls()[1].body.clone().unwrap();
    assert_eq!(body["branch"], "main");
}

#[tokio::test]
async fn project_create_prompts_key_selection_when_keys_exist() {
    let ctx = quiet_ctx();
    let api = MockApi::new();
    api.push_response(json!([
        {"name": "deploy", "auth_type": "ssh"},
        {"name": "ci", "auth_type": "pat"},
    ]));
    api.push_response(json!({"name": "myapp", "remote": "git@github.com:org/repo.git"}));

    let prompter = ScriptedPrompter::new();
    prompter.push_selection(1);

    commands::project_create(
        &ctx,
        &api,
        &prompter,
        Some("myapp"),
        Some("org/repo".to_string()),
        None,
        None,
    )
    .await
    .unwrap();

    let body = api.calls()[1].body.clone().unwrap();
    assert_eq!(body["key"], "ci");
}

#[tokio::test]
async fn project_create_cancelled_key_selection_aborts_without_creating() {
    let ctx = quiet_ctx();
    let api = MockApi::new();
    api.push_response(json!([{"name": "deploy", "auth_type": "ssh"}]));

    let prompter = ScriptedPrompter::cancelled();
    let err = commands::project_create(
        &ctx,
        &api,
        &prompter,
        Some("myapp"),
        Some("org/repo".to_string()),
        None,
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PromptError>(),
        Some(PromptError::Cancelled)
    ));
    // The create call never happened.
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn project_create_from_checkout_uses_origin_url() {
    let dir = tempfile::TempDir::new().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();
    repo.remote("origin", "git@github.com:org/checkout.git")
        .unwrap();

    let ctx = quiet_ctx();
    let api = MockApi::new();
    api.push_response(json!([]));
    api.push_response(json!({"name": "co", "remote": "git@github.com:org/checkout.git"}));

    let prompter = ScriptedPrompter::new();
    commands::project_create(
        &ctx,
        &api,
        &prompter,
        Some("co"),
        Some(dir.path().to_string_lossy().to_string()),
        None,
        None,
    )
    .await
    .unwrap();

    let body = api.calls()[1].body.clone().unwrap();
    assert_eq!(body["remote"], "git@github.com:org/checkout.git");
}

// =============================================================================
// Environment variables
// =============================================================================

#[tokio::test]
async fn env_set_uppercases_key_regardless_of_input_case() {
    let ctx = quiet_ctx();
    let api = MockApi::new();

    commands::env_set(&ctx, &api, "proj", "dev", "port", "8080")
        .await
        .unwrap();

    let calls = api.calls();
    assert_eq!(calls[0].verb, Verb::Update);
    assert_eq!(calls[0].path, "env/proj/dev");
    assert_eq!(calls[0].body, Some(json!({"key": "PORT", "value": "8080"})));
}

#[tokio::test]
async fn env_import_issues_one_update_per_unique_key() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "PORT=8080\nDB_URL=postgres://x\nPORT=9090\nmixed_Case=1\n").unwrap();

    let ctx = quiet_ctx();
    let api = MockApi::new();
    commands::env_import(&ctx, &api, "proj", "dev", &path)
        .await
        .unwrap();

    let calls = api.calls();
    // Three unique keys, three updates, file order, casing preserved.
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].body, Some(json!({"key": "PORT", "value": "9090"})));
    assert_eq!(
        calls[1].body,
        Some(json!({"key": "DB_URL", "value": "postgres://x"}))
    );
    assert_eq!(calls[2].body, Some(json!({"key": "mixed_Case", "value": "1"})));
}

// =============================================================================
// Page deploy
// =============================================================================

#[tokio::test]
async fn page_deploy_of_directory_fails_before_any_upload() {
    let dir = tempfile::TempDir::new().unwrap();
    let ctx = quiet_ctx();
    let api = MockApi::new();

    let err = commands::page_deploy(&ctx, &api, "example.com", dir.path(), false)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("directory"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn page_deploy_uploads_to_fqdn_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let artifact = dir.path().join("payload.tar");
    std::fs::write(&artifact, b"tarball").unwrap();

    let ctx = quiet_ctx();
    let api = MockApi::new();
    commands::page_deploy(&ctx, &api, "example.com", &artifact, false)
        .await
        .unwrap();

    let calls = api.calls();
    assert_eq!(calls[0].verb, Verb::Upload);
    assert_eq!(calls[0].path, "upload/example.com");
    assert_eq!(calls[0].raw.as_deref(), Some(&b"tarball"[..]));
}

// =============================================================================
// Auth keys
// =============================================================================

#[tokio::test]
async fn auth_create_import_names_key_after_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let key_path = dir.path().join("deploy key.pem");
    std::fs::write(&key_path, "-----BEGIN KEY-----\n").unwrap();

    let api = MockApi::new();
    api.push_response(json!({"name": "deploy_key", "auth_type": "ssh"}));

    let prompter = ScriptedPrompter::new();
    commands::auth_create(&api, &prompter, None, false, None, Some(key_path.as_path()))
        .await
        .unwrap();

    let body = api.calls()[0].body.clone().unwrap();
    assert_eq!(body["name"], "deploy_key");
    assert_eq!(body["auth_type"], "ssh");
    assert!(body["auth_key"].as_str().unwrap().contains("BEGIN KEY"));
}

#[tokio::test]
async fn auth_create_interactive_pat_flow() {
    let api = MockApi::new();
    api.push_response(json!({"name": "ci", "auth_type": "pat"}));

    let prompter = ScriptedPrompter::new();
    prompter.push_selection(1); // pat
    prompter.push_line("ghp_secret");

    commands::auth_create(&api, &prompter, Some("ci".to_string()), false, None, None)
        .await
        .unwrap();

    let body = api.calls()[0].body.clone().unwrap();
    assert_eq!(body["auth_type"], "pat");
    assert_eq!(body["auth_key"], "ghp_secret");
}

// =============================================================================
// Batch ordering
// =============================================================================

#[tokio::test]
async fn project_update_applies_calls_in_issue_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let env_path = dir.path().join(".env");
    std::fs::write(&env_path, "FROM_FILE=1\n").unwrap();

    let ctx = quiet_ctx();
    let api = MockApi::new();
    api.push_response(json!({"name": "app", "remote": "r"}));

    commands::project_update(
        &ctx,
        &api,
        "app",
        None,
        Some("main".to_string()),
        None,
        &["a=1".to_string(), "not-a-pair".to_string(), "b=2".to_string()],
        &["C".to_string()],
        Some(env_path.as_path()),
    )
    .await
    .unwrap();

    let calls = api.calls();
    let paths: Vec<&str> = calls.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "project/app",
            "secret/app",
            "secret/app",
            "secret/app/C",
            "secret/app",
        ]
    );
    // Malformed pair skipped; the set keys that went through are upper-cased.
    assert_eq!(calls[1].body, Some(json!({"key": "A", "value": "1"})));
    assert_eq!(calls[2].body, Some(json!({"key": "B", "value": "2"})));
    // Imported keys keep their file casing.
    assert_eq!(calls[4].body, Some(json!({"key": "FROM_FILE", "value": "1"})));
}
