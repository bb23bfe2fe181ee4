//! config commands - platform-side configuration

use anyhow::Result;
use serde_json::json;

use crate::api::Api;
use crate::cli::Context;
use crate::ui::output;

/// List platform configuration.
pub async fn list(api: &dyn Api) -> Result<()> {
    let result = api.get("config").await?;
    output::print_table(&result, &[("Key", "key"), ("Value", "value")]);
    Ok(())
}

/// Set a platform configuration value.
pub async fn set(ctx: &Context, api: &dyn Api, key: &str, value: &str) -> Result<()> {
    let result = api
        .update("config", json!({"key": key, "value": value}))
        .await?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}

/// Remove a platform configuration value.
pub async fn unset(ctx: &Context, api: &dyn Api, key: &str) -> Result<()> {
    let result = api.delete(&format!("config/{}", key)).await?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;

    fn test_ctx() -> Context {
        Context {
            config: crate::core::config::CliConfig::default(),
            config_path: std::path::PathBuf::new(),
            interactive: false,
            verbosity: crate::ui::output::Verbosity::Quiet,
        }
    }

    #[tokio::test]
    async fn set_sends_key_and_value() {
        let api = MockApi::new();
        set(&test_ctx(), &api, "DISCORD_WEBHOOK", "https://hook")
            .await
            .unwrap();
        assert_eq!(api.calls()[0].path, "config");
        assert_eq!(
            api.calls()[0].body,
            Some(json!({"key": "DISCORD_WEBHOOK", "value": "https://hook"}))
        );
    }

    #[tokio::test]
    async fn unset_addresses_the_key() {
        let api = MockApi::new();
        unset(&test_ctx(), &api, "DISCORD_WEBHOOK").await.unwrap();
        assert_eq!(api.calls()[0].path, "config/DISCORD_WEBHOOK");
    }
}
