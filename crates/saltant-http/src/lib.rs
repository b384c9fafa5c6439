// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP transport abstraction for the saltant SDK.
//!
//! The SDK never talks to an HTTP library directly. It builds an
//! [`HttpRequest`], hands it to an [`HttpTransport`], and interprets the
//! [`HttpResponse`] it gets back. Transports report every status code as a
//! response; only failures to obtain a response at all (DNS, refused
//! connections, TLS, timeouts) are errors.
//!
//! The native backend is [`UreqTransport`], a blocking client built on `ureq`.
//!
//! # Example
//!
//! ```no_run
//! use saltant_http::{HttpRequest, HttpTransport, Method, UreqTransport};
//!
//! # fn example() -> Result<(), saltant_http::HttpError> {
//! let transport = UreqTransport::new();
//! let response = transport.send(
//!     HttpRequest::new(Method::Get, "https://saltant.example.com/api/users/")
//!         .header("Authorization", "Token abc123"),
//! )?;
//! println!("status: {}", response.status);
//! # Ok(())
//! # }
//! ```

mod error;
mod native;
mod request;

pub use error::HttpError;
pub use native::{DEFAULT_MAX_BODY_BYTES, UreqTransport};
pub use request::{HttpRequest, HttpResponse, Method};

/// A blocking HTTP transport.
///
/// Implementations must be safe to share between threads; the SDK holds a
/// single transport behind an `Arc` and reuses it for every request.
pub trait HttpTransport: Send + Sync {
    /// Perform the request and return the response, whatever its status.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(request)
    }
}
