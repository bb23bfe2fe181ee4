//! api
//!
//! Client for the platform's versioned REST surface.
//!
//! # Design
//!
//! The [`Api`] trait exposes the five verbs every resource family is
//! built on: `get`, `create`, `update`, `delete`, `upload`, plus a
//! filtered `list`. Resource-specific code composes paths from
//! `/`-joined segments (`project/myapp`, `env/myapp/staging/PORT`) and
//! never talks HTTP directly.
//!
//! Verbs return the decoded JSON body as a generic
//! [`serde_json::Value`]; call sites that need field access go through
//! [`decode`] into the typed records in [`crate::core::types`].
//!
//! Two implementations exist:
//!
//! - [`HttpApi`] - reqwest-backed, one request per call, no retries
//! - [`MockApi`] - in-memory recording implementation for tests

pub mod error;
pub mod http;
pub mod mock;

pub use error::{ApiError, FieldError};
pub use http::HttpApi;
pub use mock::MockApi;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The five platform verbs.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single client can be
/// shared by reference across async calls.
#[async_trait]
pub trait Api: Send + Sync {
    /// Fetch a resource or collection.
    async fn get(&self, path: &str) -> Result<Value, ApiError>;

    /// Fetch a collection, optionally narrowed with `filter_by`.
    async fn list(&self, path: &str, filter: Option<&str>) -> Result<Value, ApiError>;

    /// Create a resource from a JSON payload.
    async fn create(&self, path: &str, data: Value) -> Result<Value, ApiError>;

    /// Update a resource from a JSON payload.
    async fn update(&self, path: &str, data: Value) -> Result<Value, ApiError>;

    /// Delete a resource.
    async fn delete(&self, path: &str) -> Result<Value, ApiError>;

    /// Upload raw bytes to a resource path.
    ///
    /// No multipart framing; the path alone identifies the target
    /// (e.g. `upload/<fqdn>`).
    async fn upload(&self, path: &str, body: Vec<u8>) -> Result<Value, ApiError>;
}

/// Decode a response value into a typed record.
///
/// Missing or mismatched fields surface as [`ApiError::Decode`] instead
/// of panicking at access time.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
