//! core::types
//!
//! Typed records for the platform's entities.
//!
//! # Design
//!
//! Responses are decoded into these records wherever a handler needs
//! field access (key selection, token display, deploy status tables);
//! pure pass-through rendering keeps the generic JSON value. Decoding
//! failures surface as [`crate::api::ApiError::Decode`] rather than
//! being trusted at access time.
//!
//! Every entity is identified by a human-chosen name unique within its
//! collection; names are compared as given, with two documented
//! normalizations applied on the way in (auth key names: spaces to
//! underscores; variable keys in `env set`: upper-cased).

use serde::{Deserialize, Serialize};

/// How a stored authentication key authenticates against a git host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// SSH key pair; the platform holds the private half.
    Ssh,
    /// Personal access token.
    Pat,
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthType::Ssh => write!(f, "ssh"),
            AuthType::Pat => write!(f, "pat"),
        }
    }
}

/// An authentication key as returned by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthKey {
    pub name: String,
    pub auth_type: AuthType,
    /// Public half of a server-generated SSH key, when present.
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A deployable git-backed project.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    pub remote: String,
    #[serde(default)]
    pub branch: Option<String>,
    /// Name of the AuthKey bound to this project, if any.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A per-project deployment environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Environment {
    pub name: String,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A key/value variable scoped to one environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A static page addressed by FQDN.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub fqdn: String,
    #[serde(default)]
    pub cors_hosts: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A redirect from one FQDN to a page.
#[derive(Debug, Clone, Deserialize)]
pub struct Redirect {
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// An opaque deploy token, regenerable on demand.
///
/// Refreshing invalidates the previous token.
#[derive(Debug, Clone, Deserialize)]
pub struct DeployToken {
    pub token: String,
}

/// State of one deployed container, as reported by the platform.
///
/// Field casing follows the platform's compose-style payload verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerState {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Status")]
    pub status: String,
}

/// Deployment status snapshot: running containers plus recent logs.
#[derive(Debug, Clone, Deserialize)]
pub struct DeployStatus {
    #[serde(default)]
    pub ps: Vec<ContainerState>,
    #[serde(default)]
    pub logs: Option<String>,
}
