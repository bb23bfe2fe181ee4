//! env commands - environments and their variables, scoped to a project
//!
//! Variable keys are upper-cased on `set`; `import` sends keys exactly
//! as written in the file.

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::api::Api;
use crate::cli::Context;
use crate::resolve::envfile;
use crate::ui::output;

/// List a project's environments.
pub async fn list(api: &dyn Api, project: &str) -> Result<()> {
    let result = api.get(&format!("env/{}", project)).await?;
    output::print_table(
        &result,
        &[
            ("Name", "name"),
            ("Branch", "branch"),
            ("Updated", "updated_at"),
        ],
    );
    Ok(())
}

/// Create an environment under a project.
pub async fn create(
    ctx: &Context,
    api: &dyn Api,
    project: &str,
    name: &str,
    branch: Option<String>,
) -> Result<()> {
    let mut payload = json!({ "name": name });
    if let Some(branch) = branch {
        payload["branch"] = json!(branch);
    }
    let result = api.create(&format!("env/{}", project), payload).await?;
    output::success(format!("created environment {}", name), ctx.verbosity);
    output::print_kv(&result);
    Ok(())
}

/// Show an environment's variables.
pub async fn view(api: &dyn Api, project: &str, environment: &str) -> Result<()> {
    let result = api.get(&format!("env/{}/{}", project, environment)).await?;
    output::print_table(
        &result,
        &[("Key", "key"), ("Value", "value"), ("Updated", "updated_at")],
    );
    Ok(())
}

/// Delete an environment.
pub async fn delete(ctx: &Context, api: &dyn Api, project: &str, environment: &str) -> Result<()> {
    output::print(
        format!("Deleting environment {}/{}", project, environment),
        ctx.verbosity,
    );
    let result = api.delete(&format!("env/{}/{}", project, environment)).await?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}

/// Set one variable. The key is upper-cased before transmission.
pub async fn set(
    ctx: &Context,
    api: &dyn Api,
    project: &str,
    environment: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    let key = key.to_uppercase();
    api.update(
        &format!("env/{}/{}", project, environment),
        json!({"key": key, "value": value}),
    )
    .await?;
    output::success(key, ctx.verbosity);
    Ok(())
}

/// Remove one variable.
pub async fn unset(
    ctx: &Context,
    api: &dyn Api,
    project: &str,
    environment: &str,
    key: &str,
) -> Result<()> {
    api.delete(&format!("env/{}/{}/{}", project, environment, key))
        .await?;
    output::success(format!("removed {}", key), ctx.verbosity);
    Ok(())
}

/// Import variables from an env file, one update per key, in file
/// order, each reported as it completes.
pub async fn import(
    ctx: &Context,
    api: &dyn Api,
    project: &str,
    environment: &str,
    file: &Path,
) -> Result<()> {
    output::print(format!("importing {}", file.display()), ctx.verbosity);
    for (key, value) in envfile::load(file)? {
        api.update(
            &format!("env/{}/{}", project, environment),
            json!({"key": key, "value": value}),
        )
        .await?;
        output::success(key, ctx.verbosity);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::Verb;
    use crate::api::MockApi;
    use std::io::Write;

    fn test_ctx() -> Context {
        Context {
            config: crate::core::config::CliConfig::default(),
            config_path: std::path::PathBuf::new(),
            interactive: false,
            verbosity: crate::ui::output::Verbosity::Quiet,
        }
    }

    #[tokio::test]
    async fn set_uppercases_the_key() {
        let api = MockApi::new();
        set(&test_ctx(), &api, "proj", "dev", "port", "8080")
            .await
            .unwrap();

        let calls = api.calls();
        assert_eq!(calls[0].verb, Verb::Update);
        assert_eq!(calls[0].path, "env/proj/dev");
        assert_eq!(calls[0].body, Some(json!({"key": "PORT", "value": "8080"})));
    }

    #[tokio::test]
    async fn unset_addresses_the_variable() {
        let api = MockApi::new();
        unset(&test_ctx(), &api, "proj", "dev", "PORT").await.unwrap();
        let calls = api.calls();
        assert_eq!(calls[0].verb, Verb::Delete);
        assert_eq!(calls[0].path, "env/proj/dev/PORT");
    }

    #[tokio::test]
    async fn import_issues_one_update_per_key_in_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        // Duplicate key A collapses to one call with the later value.
        write!(file, "A=1\nb_lower=2\nA=3\nC=4\n").unwrap();

        let api = MockApi::new();
        import(&test_ctx(), &api, "proj", "dev", &path).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].body, Some(json!({"key": "A", "value": "3"})));
        // Key casing from the file is preserved.
        assert_eq!(calls[1].body, Some(json!({"key": "b_lower", "value": "2"})));
        assert_eq!(calls[2].body, Some(json!({"key": "C", "value": "4"})));
        assert!(calls.iter().all(|c| c.path == "env/proj/dev"));
    }

    #[tokio::test]
    async fn create_omits_branch_when_absent() {
        let api = MockApi::new();
        api.push_response(json!({"name": "dev"}));
        create(&test_ctx(), &api, "proj", "dev", None).await.unwrap();
        assert_eq!(api.calls()[0].body, Some(json!({"name": "dev"})));
    }
}
