// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Transport error types.

use thiserror::Error;

/// Failures to obtain an HTTP response.
///
/// Non-2xx responses are not errors at this layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The connection could not be established (DNS, refused, TLS, reset).
    #[error("connection error: {0}")]
    Connection(String),

    /// No response arrived within the request timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request could not be built (bad URL, unsupported scheme, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A response arrived but its body could not be used (over the size
    /// limit, or not valid JSON).
    #[error("body error: {0}")]
    Body(String),
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Body(err.to_string())
    }
}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::TimedOut {
            HttpError::Timeout(err.to_string())
        } else {
            HttpError::Connection(err.to_string())
        }
    }
}
