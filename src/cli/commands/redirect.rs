//! redirect commands - URL redirects onto existing pages
//!
//! The destination must name an existing page; that invariant is
//! enforced server-side and surfaces here as an application error.

use anyhow::Result;
use serde_json::json;

use crate::api::Api;
use crate::cli::Context;
use crate::ui::output;

/// List redirects.
pub async fn list(api: &dyn Api) -> Result<()> {
    let result = api.get("redirect").await?;
    output::print_table(
        &result,
        &[
            ("Source", "source"),
            ("Destination", "destination"),
            ("Updated", "updated_at"),
        ],
    );
    Ok(())
}

/// Create a redirect.
pub async fn create(ctx: &Context, api: &dyn Api, source: &str, destination: &str) -> Result<()> {
    let result = api
        .create(
            "redirect",
            json!({"source": source, "destination": destination}),
        )
        .await?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}

/// Point an existing redirect at a new destination.
pub async fn update(ctx: &Context, api: &dyn Api, source: &str, destination: &str) -> Result<()> {
    let result = api
        .update(
            &format!("redirect/{}", source),
            json!({"destination": destination}),
        )
        .await?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}

/// Delete a redirect.
pub async fn delete(ctx: &Context, api: &dyn Api, source: &str) -> Result<()> {
    let result = api.delete(&format!("redirect/{}", source)).await?;
    output::print_result(&result, ctx.verbosity);
    Ok(())
}
