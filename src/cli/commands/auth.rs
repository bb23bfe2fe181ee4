//! auth commands - manage authentication keys
//!
//! # Security
//!
//! Key material and tokens travel to the platform but are never echoed
//! back by this CLI, with one exception: the public half of a
//! server-generated SSH key is printed alone so it can be pasted into
//! a git host.

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::api::{decode, Api};
use crate::cli::Context;
use crate::core::types::{AuthKey, AuthType};
use crate::resolve::auth_key;
use crate::ui::output;
use crate::ui::prompts::Prompter;

/// List authentication keys, optionally filtered by name.
pub async fn list(api: &dyn Api, filter: Option<&str>) -> Result<()> {
    let result = api.list("auth", filter).await?;
    output::print_table(
        &result,
        &[
            ("Name", "name"),
            ("Type", "auth_type"),
            ("Updated", "updated_at"),
        ],
    );
    Ok(())
}

/// Show one key's details.
pub async fn view(api: &dyn Api, name: &str) -> Result<()> {
    let result = api.get(&format!("auth/{}", name)).await?;
    output::print_kv(&result);
    Ok(())
}

/// Create a key from flags, an import file, or interactive fallback.
pub async fn create(
    api: &dyn Api,
    prompter: &dyn Prompter,
    name: Option<String>,
    ssh: bool,
    pat: Option<String>,
    import: Option<&Path>,
) -> Result<()> {
    let payload = auth_key::resolve(name, ssh, pat, import, prompter)?;
    let created_type = payload.auth_type;

    let result = api.create("auth", serde_json::to_value(&payload)?).await?;

    if created_type == AuthType::Ssh {
        // Print the generated public key bare so it pastes cleanly.
        let key: AuthKey = decode(result.clone())?;
        if let Some(public_key) = key.public_key {
            println!("{}", public_key);
            return Ok(());
        }
    }
    output::print_kv(&result);
    Ok(())
}

/// Delete a key, selecting one interactively when no name was given.
pub async fn delete(
    ctx: &Context,
    api: &dyn Api,
    prompter: &dyn Prompter,
    name: Option<&str>,
) -> Result<()> {
    let name = match name {
        Some(name) => name.to_string(),
        None => {
            let keys: Vec<AuthKey> = decode(api.get("auth").await?)?;
            if keys.is_empty() {
                bail!("no authentication keys found");
            }
            let names: Vec<String> = keys.into_iter().map(|k| k.name).collect();
            let choice = prompter.select("Select a key for removal", &names)?;
            names[choice].clone()
        }
    };

    output::print(format!("Deleting key {}", name), ctx.verbosity);
    let result = api
        .delete(&format!("auth/{}", name))
        .await
        .with_context(|| format!("failed to delete key '{}'", name))?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}
