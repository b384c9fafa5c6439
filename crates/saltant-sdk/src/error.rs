// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for saltant-sdk.

use std::collections::BTreeMap;

use saltant_http::HttpError;
use thiserror::Error;

/// Result type using SdkError.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors that can occur when using the saltant SDK.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The server rejected the credentials (401/403).
    #[error("authentication error [{status}]: {message}")]
    Authentication { status: u16, message: String },

    /// The requested resource does not exist (404).
    #[error("not found: {url}: {message}")]
    NotFound { url: String, message: String },

    /// The server rejected the payload (400/422).
    #[error("validation error [{status}]: {message}")]
    Validation {
        status: u16,
        message: String,
        /// Field name to messages, as reported by the server.
        field_errors: BTreeMap<String, Vec<String>>,
    },

    /// The action is not allowed in the resource's current state (409).
    #[error("invalid state: {message}")]
    InvalidState { message: String },

    /// Any other non-2xx response.
    #[error("http error [{status}]: {body}")]
    Http { status: u16, body: String },

    /// Waiting for a task instance exceeded the caller's timeout.
    #[error("timed out after {0}ms waiting for task instance to finish")]
    Timeout(u64),

    /// The request never got a response (DNS, refused, TLS, request timeout).
    #[error("connection error: {0}")]
    Connection(String),

    /// A body could not be encoded, or a response body could not be used
    /// (over the transport's size limit or not matching the record).
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl SdkError {
    /// Classify a non-2xx response.
    pub(crate) fn from_status(url: &str, status: u16, body: String) -> Self {
        match status {
            401 | 403 => SdkError::Authentication {
                status,
                message: detail_message(&body),
            },
            404 => SdkError::NotFound {
                url: url.to_string(),
                message: detail_message(&body),
            },
            400 | 422 => {
                let field_errors = field_errors(&body);
                let message = if field_errors.is_empty() {
                    detail_message(&body)
                } else {
                    summarize_fields(&field_errors)
                };
                SdkError::Validation {
                    status,
                    message,
                    field_errors,
                }
            }
            409 => SdkError::InvalidState {
                message: detail_message(&body),
            },
            _ => SdkError::Http { status, body },
        }
    }

    /// HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Authentication { status, .. }
            | SdkError::Validation { status, .. }
            | SdkError::Http { status, .. } => Some(*status),
            SdkError::NotFound { .. } => Some(404),
            SdkError::InvalidState { .. } => Some(409),
            _ => None,
        }
    }

    /// Whether this is a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::NotFound { .. })
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<HttpError> for SdkError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::InvalidRequest(msg) => SdkError::InvalidInput(msg),
            // The server answered; only its body was unusable.
            HttpError::Body(msg) => SdkError::Serialization(msg),
            other => SdkError::Connection(other.to_string()),
        }
    }
}

impl From<url::ParseError> for SdkError {
    fn from(err: url::ParseError) -> Self {
        SdkError::InvalidInput(err.to_string())
    }
}

/// Pull `detail` out of a DRF error body, falling back to the raw text.
fn detail_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Parse DRF field errors: `{"field": ["msg", ...], "detail": "..."}`.
fn field_errors(body: &str) -> BTreeMap<String, Vec<String>> {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) else {
        return BTreeMap::new();
    };

    map.into_iter()
        .filter(|(key, _)| key != "detail")
        .map(|(key, value)| {
            let messages = match value {
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
                serde_json::Value::String(s) => vec![s],
                other => vec![other.to_string()],
            };
            (key, messages)
        })
        .collect()
}

fn summarize_fields(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}
