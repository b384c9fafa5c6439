// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! In-memory transport and fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use saltant_http::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use serde_json::json;
use uuid::Uuid;

use crate::{Client, ClientConfig};

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub(crate) fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push(HttpResponse::json_body(status, &body));
    }

    pub(crate) fn push_error(&self, error: HttpError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no requests recorded")
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpTransport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let description = format!("{} {}", request.method, request.url);
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Connection(format!("unscripted request: {}", description))))
    }
}

/// A client over the scripted transport that skips the credential check.
pub(crate) fn scripted_client(transport: &Arc<ScriptedTransport>) -> Client {
    let config = ClientConfig::new("http://saltant.test/api/", "token")
        .with_test_if_authenticated(false);
    Client::with_transport(config, transport.clone()).unwrap()
}

pub(crate) fn queue_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user": "alice",
        "name": name,
        "description": "",
        "private": false,
        "active": true,
        "whitelists": [],
    })
}

pub(crate) fn task_instance_json(uuid: Uuid, state: &str) -> serde_json::Value {
    json!({
        "uuid": uuid,
        "name": "nightly",
        "state": state,
        "user": "alice",
        "task_queue": 1,
        "task_type": 3,
        "datetime_created": "2018-07-17T18:54:25.392437Z",
        "datetime_finished": null,
        "arguments": {"sample": "A123"},
    })
}
