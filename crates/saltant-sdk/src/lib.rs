// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! saltant SDK
//!
//! Typed client for the saltant job API.
//!
//! The crate maps the API's REST endpoints onto typed records and method
//! calls. It is synchronous: every call blocks until the response arrives.
//!
//! # Architecture
//!
//! - [`Client`] holds the configuration and one [`ResourceManager`] per
//!   endpoint (task types, task instances, queues, whitelists, users)
//! - A manager issues exactly one request per call and wraps decoded records
//!   in a [`Model`]
//! - A model is a snapshot bound to its manager; it can `put`, `patch` and
//!   `refresh` itself, and task instances can `clone_instance`, `terminate`
//!   and `wait_until_finished`
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use saltant_sdk::{Client, CreateTaskInstanceOptions, WaitOptions};
//!
//! # fn example() -> saltant_sdk::Result<()> {
//! // Reads SALTANT_API_URL and SALTANT_AUTH_TOKEN
//! let client = Client::from_env()?;
//!
//! let queue = client.task_queues().get_by_name("default")?;
//! let task_type = client.container_task_types().get_by_name("fastqc")?;
//!
//! let options = CreateTaskInstanceOptions::new(task_type.id, queue.id)
//!     .with_argument("sample", serde_json::json!("A123"));
//! let mut instance = client.container_task_instances().create(&options)?;
//!
//! instance.wait_until_finished(WaitOptions::new().with_timeout(Duration::from_secs(3600)))?;
//! println!("{} finished: {}", instance.uuid, instance.state);
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
mod error;
mod manager;
mod resource;
mod types;
mod wait;

#[cfg(test)]
mod test_support;

pub use client::Client;
pub use config::{API_URL_ENV, AUTH_TOKEN_ENV, AuthScheme, ClientConfig, DEFAULT_REQUEST_TIMEOUT};
pub use error::{Result, SdkError};
pub use manager::{ListFilters, Model, ResourceManager};
pub use resource::{Creatable, Named, Resource, Updatable};
pub use types::{
    ContainerTaskType, ContainerTaskTypeOptions, ContainerType, CreateTaskInstanceOptions,
    ExecutableTaskType, ExecutableTaskTypeOptions, TaskInstance, TaskQueue, TaskQueueOptions,
    TaskState, TaskWhitelist, TaskWhitelistOptions, TaskWhitelistPatch, User,
};
pub use wait::{DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL, WaitOptions};

pub use saltant_http::{HttpError, HttpRequest, HttpResponse, HttpTransport, Method};
