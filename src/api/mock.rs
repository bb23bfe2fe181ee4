//! api::mock
//!
//! Mock API implementation for deterministic testing.
//!
//! # Design
//!
//! The mock records every call (verb, path, body) and replays canned
//! responses in FIFO order, so resolver and command tests can assert
//! the exact call sequence a command issued without a network or a
//! server. An empty response queue answers `null`, which matches the
//! platform's empty-body responses.
//!
//! # Example
//!
//! ```
//! use ccd::api::{Api, MockApi};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let api = MockApi::new();
//! api.push_response(json!({"name": "myapp"}));
//!
//! let result = api.create("project", json!({"name": "myapp"})).await.unwrap();
//! assert_eq!(result["name"], "myapp");
//!
//! let calls = api.calls();
//! assert_eq!(calls.len(), 1);
//! assert_eq!(calls[0].path, "project");
//! # });
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;
use super::Api;

/// Which verb a recorded call used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Create,
    Update,
    Delete,
    Upload,
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verb::Get => write!(f, "get"),
            Verb::Create => write!(f, "create"),
            Verb::Update => write!(f, "update"),
            Verb::Delete => write!(f, "delete"),
            Verb::Upload => write!(f, "upload"),
        }
    }
}

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The verb used.
    pub verb: Verb,
    /// The path the call addressed, including any query string.
    pub path: String,
    /// JSON payload for `create`/`update` calls.
    pub body: Option<Value>,
    /// Raw payload for `upload` calls.
    pub raw: Option<Vec<u8>>,
}

#[derive(Debug, Default)]
struct MockApiInner {
    /// Canned responses, popped front-first.
    responses: VecDeque<Result<Value, ApiError>>,
    /// Calls recorded so far.
    calls: Vec<RecordedCall>,
}

/// Recording API double.
#[derive(Debug, Default)]
pub struct MockApi {
    inner: Mutex<MockApiInner>,
}

impl MockApi {
    /// Create an empty mock. All calls answer `null` until responses
    /// are queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn push_response(&self, value: Value) {
        self.inner.lock().unwrap().responses.push_back(Ok(value));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: ApiError) {
        self.inner.lock().unwrap().responses.push_back(Err(error));
    }

    /// Snapshot of all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record(
        &self,
        verb: Verb,
        path: &str,
        body: Option<Value>,
        raw: Option<Vec<u8>>,
    ) -> Result<Value, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall {
            verb,
            path: path.to_string(),
            body,
            raw,
        });
        inner.responses.pop_front().unwrap_or(Ok(Value::Null))
    }
}

#[async_trait]
impl Api for MockApi {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.record(Verb::Get, path, None, None)
    }

    async fn list(&self, path: &str, filter: Option<&str>) -> Result<Value, ApiError> {
        let path = match filter {
            Some(value) if !value.is_empty() => format!("{}?filter_by={}", path, value),
            _ => path.to_string(),
        };
        self.record(Verb::Get, &path, None, None)
    }

    async fn create(&self, path: &str, data: Value) -> Result<Value, ApiError> {
        self.record(Verb::Create, path, Some(data), None)
    }

    async fn update(&self, path: &str, data: Value) -> Result<Value, ApiError> {
        self.record(Verb::Update, path, Some(data), None)
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.record(Verb::Delete, path, None, None)
    }

    async fn upload(&self, path: &str, body: Vec<u8>) -> Result<Value, ApiError> {
        self.record(Verb::Upload, path, None, Some(body))
    }
}
