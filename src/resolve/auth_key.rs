//! resolve::auth_key
//!
//! Payload resolution for `auth create`.
//!
//! Exactly one of {an imported key file, `--ssh`, `--pat`} decides the
//! auth type; with none given, the method (and for `pat` the secret)
//! is prompted for. The secret is read masked and never echoed.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::core::types::AuthType;
use crate::ui::prompts::{PromptError, Prompter};

/// Payload for `POST auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthKeyPayload {
    pub name: Option<String>,
    pub auth_type: AuthType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_key: Option<String>,
}

/// Errors from auth key resolution.
#[derive(Debug, Error)]
pub enum AuthKeyError {
    #[error("failed to read key file '{path}': {source}")]
    Import {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Prompt(#[from] PromptError),
}

/// Build the create payload from flags, an optional import file, and
/// interactive fallback.
pub fn resolve(
    name: Option<String>,
    ssh: bool,
    pat: Option<String>,
    import: Option<&Path>,
    prompter: &dyn Prompter,
) -> Result<AuthKeyPayload, AuthKeyError> {
    let mut name = name;
    let auth_type;
    let mut auth_key = None;

    if let Some(path) = import {
        auth_type = AuthType::Ssh;
        auth_key = Some(
            std::fs::read_to_string(path).map_err(|source| AuthKeyError::Import {
                path: path.to_path_buf(),
                source,
            })?,
        );
        if name.is_none() {
            name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string());
        }
    } else if ssh {
        auth_type = AuthType::Ssh;
    } else if let Some(token) = pat {
        auth_type = AuthType::Pat;
        auth_key = Some(token);
    } else {
        let methods = [AuthType::Ssh.to_string(), AuthType::Pat.to_string()];
        auth_type = match prompter.select("Authentication method", &methods)? {
            0 => AuthType::Ssh,
            _ => AuthType::Pat,
        };
        if auth_type == AuthType::Pat {
            auth_key = Some(prompter.password("Personal access token")?);
        }
    }

    Ok(AuthKeyPayload {
        name: name.map(|n| normalize_name(&n)),
        auth_type,
        auth_key,
    })
}

/// Key names are stored with spaces replaced by underscores.
pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "_")
}
