// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Native blocking transport backed by `ureq`.

use std::error::Error as _;
use std::io::Read;
use std::time::Duration;

use tracing::trace;

use crate::{HttpError, HttpRequest, HttpResponse, HttpTransport};

/// Default timeout applied when a request does not carry its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Largest response body read by default (256 MiB). Unpaginated list
/// endpoints can return far more than ureq's 10 MB `into_string` cap.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// Blocking HTTP transport using a shared `ureq::Agent`.
///
/// The agent keeps its own connection pool, so cloning the transport or
/// sharing it across threads reuses connections.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
    max_body_bytes: u64,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }
}

impl UreqTransport {
    /// Create a transport with the default timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with a custom default timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("saltant-http/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            timeout,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Set the largest response body accepted; larger bodies fail with
    /// [`HttpError::Body`].
    pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// The default timeout for requests without their own.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        trace!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = self
            .agent
            .request(request.method.as_str(), &request.url)
            .timeout(request.timeout.unwrap_or(self.timeout));

        for (name, value) in &request.headers {
            builder = builder.set(name, value);
        }
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }

        let result = match request.body {
            Some(body) => builder.send_json(body),
            None => builder.call(),
        };

        let response = match result {
            Ok(response) => response,
            // ureq reports 4xx/5xx as errors; the status is still a response here.
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => return Err(transport_error(transport)),
        };

        let status = response.status();
        let body = read_body(response, self.max_body_bytes)?;

        trace!(status, bytes = body.len(), "Received response");

        Ok(HttpResponse { status, body })
    }
}

/// Read at most `limit` bytes; invalid UTF-8 is replaced, not rejected.
fn read_body(response: ureq::Response, limit: u64) -> Result<String, HttpError> {
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)?;

    if bytes.len() as u64 > limit {
        return Err(HttpError::Body(format!(
            "response body exceeds {} bytes",
            limit
        )));
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn transport_error(transport: ureq::Transport) -> HttpError {
    if is_timeout(&transport) {
        return HttpError::Timeout(transport.to_string());
    }

    match transport.kind() {
        ureq::ErrorKind::InvalidUrl
        | ureq::ErrorKind::UnknownScheme
        | ureq::ErrorKind::InsecureRequestHttpsOnly
        | ureq::ErrorKind::InvalidProxyUrl
        | ureq::ErrorKind::BadHeader => HttpError::InvalidRequest(transport.to_string()),
        _ => HttpError::Connection(transport.to_string()),
    }
}

fn is_timeout(transport: &ureq::Transport) -> bool {
    let mut source = transport.source();
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ) {
                return true;
            }
        }
        source = err.source();
    }
    false
}
