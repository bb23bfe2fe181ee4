//! api::error
//!
//! Error taxonomy for platform API calls.
//!
//! # Design
//!
//! Every failure of a platform call is tagged with one of four kinds:
//!
//! - `Network` - the request never produced an HTTP response (DNS,
//!   connection refused, timeout). Always fatal for the invocation.
//! - `Api` - the platform answered with status >= 400 and a plain
//!   `detail` message.
//! - `Validation` - the platform answered with status >= 400 and a list
//!   of per-field validation errors.
//! - `Decode` - the response arrived but did not match the expected
//!   shape.
//!
//! Errors carry no recovery logic; the top-level handler in `main` maps
//! them to output lines and a non-zero exit code.

use serde_json::Value;
use thiserror::Error;

/// A single field-level validation error from the platform.
///
/// Derived from the platform's error body shape, where each entry is
/// `{loc: [<scope>, <field>], msg: <message>}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable message for that field.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors from platform API calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request failed before an HTTP response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The platform rejected the call with a plain error message.
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the platform's `detail` field
        message: String,
    },

    /// The platform rejected the call with field-level validation errors.
    #[error("{}", format_fields(.0))]
    Validation(Vec<FieldError>),

    /// The response body did not decode into the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ApiError {
    /// Classify an HTTP error body.
    ///
    /// The platform reports failures as a JSON object with a `detail`
    /// field that is either a message string or a list of
    /// `{loc, msg}` objects. Anything else falls back to an `Api` error
    /// carrying the raw body.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        let value: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(_) => {
                return ApiError::Api {
                    status,
                    message: fallback_message(status, body),
                }
            }
        };

        match value.get("detail") {
            Some(Value::String(message)) => ApiError::Api {
                status,
                message: message.clone(),
            },
            Some(Value::Array(items)) => {
                let fields: Vec<FieldError> = items.iter().map(field_error).collect();
                if fields.is_empty() {
                    ApiError::Api {
                        status,
                        message: fallback_message(status, body),
                    }
                } else {
                    ApiError::Validation(fields)
                }
            }
            _ => ApiError::Api {
                status,
                message: fallback_message(status, body),
            },
        }
    }
}

/// Extract one `FieldError` from a `{loc, msg}` item.
///
/// The field name is the second `loc` element (the first names the
/// request scope, e.g. `body`). Items that do not match the shape
/// still produce a line rather than being dropped.
fn field_error(item: &Value) -> FieldError {
    let field = item
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.get(1).or_else(|| loc.last()))
        .and_then(Value::as_str)
        .unwrap_or("body")
        .to_string();
    let message = item
        .get("msg")
        .and_then(Value::as_str)
        .unwrap_or("invalid value")
        .to_string();
    FieldError { field, message }
}

fn fallback_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("request failed with status {}", status)
    } else {
        format!("request failed with status {}: {}", status, trimmed)
    }
}
