// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Authenticated request execution shared by every manager.

use std::sync::Arc;

use saltant_http::{HttpRequest, HttpResponse, HttpTransport, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Result, SdkError};

const USER_AGENT: &str = concat!("saltant-sdk/", env!("CARGO_PKG_VERSION"));

/// One base URL, one token, one transport.
pub(crate) struct Api {
    transport: Arc<dyn HttpTransport>,
    root: Url,
    authorization: String,
    config: ClientConfig,
}

impl Api {
    pub(crate) fn new(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let root = config.api_root()?;
        if root.cannot_be_a_base() {
            return Err(SdkError::Config(format!(
                "base API URL cannot be used as a base: {}",
                root
            )));
        }

        Ok(Self {
            transport,
            root,
            authorization: config.authorization(),
            config,
        })
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn root(&self) -> &Url {
        &self.root
    }

    /// Join path segments onto the API root, always ending with `/`.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.root.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| SdkError::Config("base API URL cannot be a base".to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
            path.push("");
        }
        Ok(url)
    }

    /// Send a request; non-2xx responses become classified errors.
    pub(crate) fn send(
        &self,
        method: Method,
        url: &Url,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse> {
        let mut request = HttpRequest::new(method, url.as_str())
            .header("Authorization", self.authorization.as_str())
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .query_pairs(query.iter().cloned())
            .timeout(self.config.request_timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.transport.send(request)?;
        debug!(%method, url = %url, status = response.status, "API response");

        if response.is_success() {
            Ok(response)
        } else {
            let err = SdkError::from_status(url.as_str(), response.status, response.body);
            warn!(%method, url = %url, error = %err, "API request failed");
            Err(err)
        }
    }

    /// Send a request and decode the JSON body.
    pub(crate) fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &Url,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let response = self.send(method, url, query, body)?;
        response.json().map_err(|e| {
            SdkError::Serialization(format!("decoding response from {}: {}", url, e))
        })
    }
}
