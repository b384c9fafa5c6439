// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Client aggregating every resource manager.

use std::fmt;
use std::sync::Arc;

use saltant_http::{HttpTransport, Method, UreqTransport};
use tracing::{debug, info, instrument};

use crate::api::Api;
use crate::config::ClientConfig;
use crate::error::{Result, SdkError};
use crate::manager::ResourceManager;
use crate::types::{
    ContainerTaskType, ExecutableTaskType, TaskInstance, TaskQueue, TaskWhitelist, User,
};

const CONTAINER_TASK_INSTANCES: &str = "containertaskinstances";
const CONTAINER_TASK_TYPES: &str = "containertasktypes";
const EXECUTABLE_TASK_INSTANCES: &str = "executabletaskinstances";
const EXECUTABLE_TASK_TYPES: &str = "executabletasktypes";
const TASK_QUEUES: &str = "taskqueues";
const TASK_WHITELISTS: &str = "taskwhitelists";
const USERS: &str = "users";

/// Client for a saltant server.
///
/// One client holds one base URL, one token and one transport, shared by all
/// of its managers.
///
/// # Example
///
/// ```no_run
/// use saltant_sdk::{Client, ClientConfig, ListFilters};
///
/// # fn example() -> saltant_sdk::Result<()> {
/// let client = Client::new(ClientConfig::new(
///     "https://saltant.example.com/api/",
///     "p0gch4mp101fy451do9uod1s1x9i4a",
/// ))?;
///
/// for queue in client.task_queues().list(&ListFilters::new())? {
///     println!("{} (active: {})", queue.name, queue.active);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client {
    api: Arc<Api>,
    container_task_instances: ResourceManager<TaskInstance>,
    container_task_types: ResourceManager<ContainerTaskType>,
    executable_task_instances: ResourceManager<TaskInstance>,
    executable_task_types: ResourceManager<ExecutableTaskType>,
    task_queues: ResourceManager<TaskQueue>,
    task_whitelists: ResourceManager<TaskWhitelist>,
    users: ResourceManager<User>,
}

impl Client {
    /// Create a client using the native ureq transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(UreqTransport::with_timeout(config.request_timeout));
        Self::with_transport(config, transport)
    }

    /// Create a client from `SALTANT_API_URL` and `SALTANT_AUTH_TOKEN`.
    ///
    /// Fails with [`SdkError::Config`] before any request if either is unset.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(config)
    }

    /// Create a client over any transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;
        let test_if_authenticated = config.test_if_authenticated;
        let api = Arc::new(Api::new(config, transport)?);

        let client = Self {
            container_task_instances: ResourceManager::new(
                Arc::clone(&api),
                CONTAINER_TASK_INSTANCES,
            ),
            container_task_types: ResourceManager::new(Arc::clone(&api), CONTAINER_TASK_TYPES),
            executable_task_instances: ResourceManager::new(
                Arc::clone(&api),
                EXECUTABLE_TASK_INSTANCES,
            ),
            executable_task_types: ResourceManager::new(Arc::clone(&api), EXECUTABLE_TASK_TYPES),
            task_queues: ResourceManager::new(Arc::clone(&api), TASK_QUEUES),
            task_whitelists: ResourceManager::new(Arc::clone(&api), TASK_WHITELISTS),
            users: ResourceManager::new(Arc::clone(&api), USERS),
            api,
        };

        if test_if_authenticated {
            client.test_authentication()?;
        }

        debug!(root = %client.api.root(), "saltant client ready");
        Ok(client)
    }

    /// Check the credentials with a read-only request to `users/`.
    ///
    /// Only `200 OK` passes. Any other answer, including another 2xx, is
    /// reported as [`SdkError::Authentication`]; transport failures stay
    /// [`SdkError::Connection`].
    #[instrument(skip(self))]
    pub fn test_authentication(&self) -> Result<()> {
        let url = self.api.endpoint(&[USERS])?;
        match self.api.send(Method::Get, &url, &[], None) {
            Ok(response) if response.status == 200 => {
                info!("Authenticated with saltant");
                Ok(())
            }
            Ok(response) => Err(SdkError::Authentication {
                status: response.status,
                message: format!("authentication check expected 200, got {}", response.status),
            }),
            Err(err @ (SdkError::Connection(_) | SdkError::Authentication { .. })) => Err(err),
            Err(err) => Err(SdkError::Authentication {
                status: err.status().unwrap_or_default(),
                message: format!("authentication check failed: {}", err),
            }),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    pub fn container_task_instances(&self) -> &ResourceManager<TaskInstance> {
        &self.container_task_instances
    }

    pub fn container_task_types(&self) -> &ResourceManager<ContainerTaskType> {
        &self.container_task_types
    }

    pub fn executable_task_instances(&self) -> &ResourceManager<TaskInstance> {
        &self.executable_task_instances
    }

    pub fn executable_task_types(&self) -> &ResourceManager<ExecutableTaskType> {
        &self.executable_task_types
    }

    pub fn task_queues(&self) -> &ResourceManager<TaskQueue> {
        &self.task_queues
    }

    pub fn task_whitelists(&self) -> &ResourceManager<TaskWhitelist> {
        &self.task_whitelists
    }

    pub fn users(&self) -> &ResourceManager<User> {
        &self.users
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_api_url", &self.api.root().as_str())
            .finish_non_exhaustive()
    }
}
