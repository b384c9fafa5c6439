// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the saltant client.

use std::time::Duration;

use url::Url;

use crate::error::{Result, SdkError};
use crate::wait::DEFAULT_POLL_INTERVAL;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "SALTANT_API_URL";
/// Environment variable holding the auth token.
pub const AUTH_TOKEN_ENV: &str = "SALTANT_AUTH_TOKEN";

/// Default timeout for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// How the auth token is presented in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Token <token>` (DRF token authentication).
    #[default]
    Token,
    /// `Authorization: Bearer <token>` (JWT access tokens).
    Bearer,
}

impl AuthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Token => "Token",
            AuthScheme::Bearer => "Bearer",
        }
    }
}

impl std::str::FromStr for AuthScheme {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "token" => Ok(AuthScheme::Token),
            "bearer" | "jwt" => Ok(AuthScheme::Bearer),
            other => Err(SdkError::Config(format!("unknown auth scheme: {}", other))),
        }
    }
}

/// Configuration for the saltant [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the saltant API, e.g. `https://saltant.example.com/api/`.
    pub base_api_url: String,
    /// The registered user's auth token.
    pub auth_token: String,
    /// Header scheme for the token.
    pub auth_scheme: AuthScheme,
    /// Timeout applied to every request.
    pub request_timeout: Duration,
    /// Default interval between polls when waiting for a task instance.
    pub poll_interval: Duration,
    /// Make a read-only authenticated request when the client is built.
    pub test_if_authenticated: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_api_url: String::new(),
            auth_token: String::new(),
            auth_scheme: AuthScheme::Token,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            test_if_authenticated: true,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the required fields.
    pub fn new(base_api_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            base_api_url: base_api_url.into(),
            auth_token: auth_token.into(),
            ..Self::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Required:
    /// - `SALTANT_API_URL`: Base URL of the API
    /// - `SALTANT_AUTH_TOKEN`: Auth token
    ///
    /// Optional:
    /// - `SALTANT_AUTH_SCHEME`: `token` or `bearer` (default: token)
    /// - `SALTANT_REQUEST_TIMEOUT_SECS`: Request timeout (default: 90)
    /// - `SALTANT_POLL_INTERVAL_MS`: Default poll interval (default: 5000)
    /// - `SALTANT_TEST_AUTHENTICATION`: Check credentials on construction (default: true)
    pub fn from_env() -> Result<Self> {
        let base_api_url = std::env::var(API_URL_ENV)
            .map_err(|_| SdkError::Config(format!("{} is not defined", API_URL_ENV)))?;

        let auth_token = std::env::var(AUTH_TOKEN_ENV)
            .map_err(|_| SdkError::Config(format!("{} is not defined", AUTH_TOKEN_ENV)))?;

        let auth_scheme = match std::env::var("SALTANT_AUTH_SCHEME") {
            Ok(value) => value.parse()?,
            Err(_) => AuthScheme::default(),
        };

        let request_timeout_secs: u64 = std::env::var("SALTANT_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT.as_secs().to_string())
            .parse()
            .map_err(|e| SdkError::Config(format!("invalid SALTANT_REQUEST_TIMEOUT_SECS: {}", e)))?;

        let poll_interval_ms: u64 = std::env::var("SALTANT_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL.as_millis().to_string())
            .parse()
            .map_err(|e| SdkError::Config(format!("invalid SALTANT_POLL_INTERVAL_MS: {}", e)))?;

        let test_if_authenticated = std::env::var("SALTANT_TEST_AUTHENTICATION")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        let config = Self {
            base_api_url,
            auth_token,
            auth_scheme,
            request_timeout: Duration::from_secs(request_timeout_secs),
            poll_interval: Duration::from_millis(poll_interval_ms),
            test_if_authenticated,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration without touching the network.
    pub fn validate(&self) -> Result<()> {
        self.api_root()?;
        if self.auth_token.trim().is_empty() {
            return Err(SdkError::Config("auth token is empty".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(SdkError::Config("request timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// The base URL parsed and normalised to end with `/`.
    pub fn api_root(&self) -> Result<Url> {
        let mut raw = self.base_api_url.trim().to_string();
        if raw.is_empty() {
            return Err(SdkError::Config("base API URL is empty".to_string()));
        }
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = Url::parse(&raw)
            .map_err(|e| SdkError::Config(format!("invalid base API URL {}: {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SdkError::Config(format!(
                "unsupported URL scheme for base API URL: {}",
                other
            ))),
        }
    }

    /// The `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.auth_scheme.as_str(), self.auth_token)
    }

    /// Set the auth scheme.
    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the default poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Enable or disable the credential check on construction.
    pub fn with_test_if_authenticated(mut self, test: bool) -> Self {
        self.test_if_authenticated = test;
        self
    }
}
