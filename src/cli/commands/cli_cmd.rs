//! cli commands - local CLI configuration
//!
//! The only commands that touch disk instead of the platform. `set`
//! rewrites the whole file.

use anyhow::{Context as _, Result};
use serde_json::json;

use crate::cli::Context;
use crate::ui::output;

/// List local CLI configuration.
pub fn list(ctx: &Context) -> Result<()> {
    let rows: Vec<serde_json::Value> = ctx
        .config
        .entries()
        .into_iter()
        .map(|(key, value)| json!({"key": key, "value": value}))
        .collect();
    output::print_table(
        &serde_json::Value::Array(rows),
        &[("Key", "key"), ("Value", "value")],
    );
    Ok(())
}

/// Set a local CLI configuration value and rewrite the file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config.set(key, value)?;
    config
        .save(&ctx.config_path)
        .context("failed to write CLI configuration")?;
    output::print(format!("{}={}", key, value), ctx.verbosity);
    Ok(())
}
