//! api::http
//!
//! reqwest-backed implementation of the [`Api`] trait.
//!
//! # Design
//!
//! One HTTP request per logical operation. Bearer-token authorization
//! is attached to every request from the local CLI configuration.
//! Paths are joined onto the configured base URL with `/`; segments are
//! passed through unescaped, matching the platform's routing.
//!
//! There is no retry or backoff: a CLI invocation either completes its
//! calls or fails, and the caller reports the failure. Transport-level
//! failures (DNS, connection refused, timeout) are
//! [`ApiError::Network`]; responses with status >= 400 are classified
//! by [`ApiError::from_error_body`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method};
use serde_json::Value;

use super::error::ApiError;
use super::Api;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "ccd-cli";

/// Request body variants.
enum Body {
    None,
    Json(Value),
    Raw(Vec<u8>),
}

/// Platform API client over HTTP.
pub struct HttpApi {
    /// HTTP client for making requests
    client: Client,
    /// Base URL of the platform (no trailing slash)
    base_url: String,
    /// Bearer token attached to every request
    token: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("base_url", &self.base_url)
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

impl HttpApi {
    /// Create a client for the given base URL and bearer token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|e| ApiError::Network(format!("invalid token: {}", e)))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Issue one request and classify the response.
    async fn send(&self, method: Method, path: &str, body: Body) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self.client.request(method, &url).headers(self.headers()?);
        request = match body {
            Body::None => request,
            Body::Json(data) => request.json(&data),
            Body::Raw(bytes) => request.body(bytes),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status >= 400 {
            return Err(ApiError::from_error_body(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("invalid JSON response: {}", e)))
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::GET, path, Body::None).await
    }

    async fn list(&self, path: &str, filter: Option<&str>) -> Result<Value, ApiError> {
        let path = match filter {
            Some(value) if !value.is_empty() => format!("{}?filter_by={}", path, value),
            _ => path.to_string(),
        };
        self.send(Method::GET, &path, Body::None).await
    }

    async fn create(&self, path: &str, data: Value) -> Result<Value, ApiError> {
        self.send(Method::POST, path, Body::Json(data)).await
    }

    async fn update(&self, path: &str, data: Value) -> Result<Value, ApiError> {
        self.send(Method::PUT, path, Body::Json(data)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::DELETE, path, Body::None).await
    }

    async fn upload(&self, path: &str, body: Vec<u8>) -> Result<Value, ApiError> {
        self.send(Method::POST, path, Body::Raw(body)).await
    }
}
