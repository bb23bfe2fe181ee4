//! cli
//!
//! Command-line interface layer for ccd.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load the local configuration once and build the invocation context
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches
//! to handlers that drive resolver + API-client sequences. Handlers
//! return errors; the only exit point is `main`.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::core::config::CliConfig;
use crate::ui::output::Verbosity;

/// Per-invocation context, constructed once at startup.
///
/// No ambient globals: the configuration and flags travel by reference
/// into every handler.
#[derive(Debug, Clone)]
pub struct Context {
    /// Local CLI configuration (platform URL, API key).
    pub config: CliConfig,
    /// Where the configuration lives, for rewrites by `cli set`.
    pub config_path: PathBuf,
    /// Whether interactive prompts are allowed.
    pub interactive: bool,
    pub verbosity: Verbosity,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Commands are
/// async because every platform call is network I/O; a runtime is
/// built here once and the whole invocation runs inside it.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let (config, config_path) = CliConfig::load().context("failed to load CLI configuration")?;
    let ctx = Context {
        config,
        config_path,
        interactive: cli.interactive(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(commands::dispatch(cli.command, &ctx))
}
