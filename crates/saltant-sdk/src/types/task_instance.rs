// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Task instances and their lifecycle actions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::Result;
use crate::manager::{Model, ResourceManager};
use crate::resource::{Creatable, Resource};
use crate::wait::{WaitOptions, poll_until_terminal};

/// Task instance state, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Created,
    Published,
    Running,
    Successful,
    Failed,
    Terminated,
    /// A state this SDK does not know; treated as non-terminal.
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// States an instance never leaves.
    pub const TERMINAL: [TaskState; 3] = [
        TaskState::Successful,
        TaskState::Failed,
        TaskState::Terminated,
    ];

    pub fn is_terminal(&self) -> bool {
        Self::TERMINAL.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Created => "created",
            TaskState::Published => "published",
            TaskState::Running => "running",
            TaskState::Successful => "successful",
            TaskState::Failed => "failed",
            TaskState::Terminated => "terminated",
            TaskState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One execution of a task type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInstance {
    /// Assigned by the server; never changes.
    pub uuid: Uuid,
    #[serde(default)]
    pub name: String,
    pub state: TaskState,
    /// Username of the user who started the instance.
    pub user: String,
    /// Id of the queue the instance runs on.
    pub task_queue: i64,
    /// Id of the task type.
    pub task_type: i64,
    pub datetime_created: DateTime<Utc>,
    #[serde(default)]
    pub datetime_finished: Option<DateTime<Utc>>,
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Display for TaskInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.uuid)
        } else {
            write!(f, "{} ({})", self.name, self.uuid)
        }
    }
}

/// Fields for creating a task instance.
///
/// Has no `uuid` field: the server assigns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskInstanceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub task_type: i64,
    pub task_queue: i64,
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

impl CreateTaskInstanceOptions {
    pub fn new(task_type: i64, task_queue: i64) -> Self {
        Self {
            task_type,
            task_queue,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace all arguments.
    pub fn with_arguments(
        mut self,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }
}

impl Resource for TaskInstance {
    type Id = Uuid;
    const KIND: &'static str = "task instance";

    fn id(&self) -> Uuid {
        self.uuid
    }
}

impl Creatable for TaskInstance {
    type Create = CreateTaskInstanceOptions;
}

impl ResourceManager<TaskInstance> {
    /// Submit a copy of an instance; the copy gets a new UUID and starts over.
    #[instrument(skip(self, uuid), fields(uuid = %uuid))]
    pub fn clone_instance(&self, uuid: &Uuid) -> Result<Model<TaskInstance>> {
        let cloned = self.action(uuid, "clone")?;
        info!(clone = %cloned.uuid, "Cloned task instance");
        Ok(self.model(cloned))
    }

    /// Ask the server to stop an instance.
    ///
    /// Only meaningful while the instance is non-terminal; the server decides
    /// and its rejection is surfaced as-is.
    #[instrument(skip(self, uuid), fields(uuid = %uuid))]
    pub fn terminate(&self, uuid: &Uuid) -> Result<Model<TaskInstance>> {
        let instance = self.action(uuid, "terminate")?;
        info!(state = %instance.state, "Requested task instance termination");
        Ok(self.model(instance))
    }

    /// Block until the instance reaches a terminal state.
    #[instrument(skip(self, uuid), fields(uuid = %uuid))]
    pub fn wait_until_finished(
        &self,
        uuid: &Uuid,
        options: WaitOptions,
    ) -> Result<Model<TaskInstance>> {
        let poll_interval = options
            .poll_interval
            .unwrap_or(self.api().config().poll_interval);
        let finished = poll_until_terminal(|| self.fetch(uuid), poll_interval, options.timeout)?;
        info!(state = %finished.state, "Task instance finished");
        Ok(self.model(finished))
    }
}

impl Model<TaskInstance> {
    /// Submit a copy of this instance.
    pub fn clone_instance(&self) -> Result<Model<TaskInstance>> {
        self.manager().clone_instance(&self.uuid)
    }

    /// Request termination and take the returned snapshot.
    pub fn terminate(&mut self) -> Result<()> {
        let terminated = self.manager().terminate(&self.uuid)?;
        self.replace(terminated.into_inner());
        Ok(())
    }

    /// Block until terminal, then take the final snapshot.
    ///
    /// On error, including a timeout, the local fields are left untouched.
    pub fn wait_until_finished(&mut self, options: WaitOptions) -> Result<()> {
        let finished = self.manager().wait_until_finished(&self.uuid, options)?;
        self.replace(finished.into_inner());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use crate::test_support::{ScriptedTransport, scripted_client, task_instance_json};
    use saltant_http::Method;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_state_terminal_partition() {
        assert!(!TaskState::Created.is_terminal());
        assert!(!TaskState::Published.is_terminal());
        assert!(!TaskState::Running.is_terminal());
        assert!(!TaskState::Unknown.is_terminal());
        assert!(TaskState::Successful.is_terminal());
        assert!(TaskState::Failed.is_terminal());
        assert!(TaskState::Terminated.is_terminal());
    }

    #[test]
    fn test_unknown_state_decodes() {
        let state: TaskState = serde_json::from_value(json!("paused")).unwrap();
        assert_eq!(state, TaskState::Unknown);
    }

    #[test]
    fn test_create_payload_has_no_uuid() {
        let options = CreateTaskInstanceOptions::new(3, 1)
            .with_name("nightly")
            .with_argument("sample", json!("A123"));
        let body = serde_json::to_value(&options).unwrap();

        assert!(body.get("uuid").is_none());
        assert_eq!(body["task_type"], 3);
        assert_eq!(body["task_queue"], 1);
        assert_eq!(body["arguments"]["sample"], "A123");
    }

    #[test]
    fn test_with_arguments_replaces_previous() {
        let mut arguments = serde_json::Map::new();
        arguments.insert("threads".to_string(), json!(4));

        let options = CreateTaskInstanceOptions::new(3, 1)
            .with_argument("sample", json!("A123"))
            .with_arguments(arguments);

        assert_eq!(
            serde_json::to_value(&options).unwrap()["arguments"],
            json!({"threads": 4})
        );
    }

    #[test]
    fn test_clone_gets_new_uuid_and_initial_state() {
        let source = Uuid::new_v4();
        let copy = Uuid::new_v4();
        let transport = ScriptedTransport::new();
        transport.push_json(200, task_instance_json(source, "failed"));
        transport.push_json(201, task_instance_json(copy, "created"));
        let client = scripted_client(&transport);

        let instance = client.container_task_instances().get(&source).unwrap();
        let cloned = instance.clone_instance().unwrap();

        assert_ne!(cloned.uuid, instance.uuid);
        assert!(!cloned.state.is_terminal());
        assert_eq!(instance.state, TaskState::Failed);

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url,
            format!("http://saltant.test/api/containertaskinstances/{}/clone/", source)
        );
    }

    #[test]
    fn test_terminate_updates_local_snapshot() {
        let uuid = Uuid::new_v4();
        let transport = ScriptedTransport::new();
        transport.push_json(200, task_instance_json(uuid, "running"));
        transport.push_json(202, task_instance_json(uuid, "terminated"));
        let client = scripted_client(&transport);

        let mut instance = client.executable_task_instances().get(&uuid).unwrap();
        instance.terminate().unwrap();

        assert_eq!(instance.state, TaskState::Terminated);
        assert_eq!(
            transport.last_request().url,
            format!("http://saltant.test/api/executabletaskinstances/{}/terminate/", uuid)
        );
    }

    #[test]
    fn test_terminate_rejection_is_surfaced() {
        let uuid = Uuid::new_v4();
        let transport = ScriptedTransport::new();
        transport.push_json(409, json!({"detail": "Task instance already finished."}));
        let client = scripted_client(&transport);

        let err = client.container_task_instances().terminate(&uuid).unwrap_err();
        match err {
            SdkError::InvalidState { message } => {
                assert_eq!(message, "Task instance already finished.")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_wait_on_terminal_instance_fetches_once() {
        let uuid = Uuid::new_v4();
        let transport = ScriptedTransport::new();
        transport.push_json(200, task_instance_json(uuid, "successful"));
        transport.push_json(200, task_instance_json(uuid, "successful"));
        let client = scripted_client(&transport);

        let mut instance = client.container_task_instances().get(&uuid).unwrap();
        let before = transport.request_count();
        instance
            .wait_until_finished(WaitOptions::new().with_timeout(Duration::from_secs(10)))
            .unwrap();

        assert_eq!(transport.request_count() - before, 1);
        assert_eq!(instance.state, TaskState::Successful);
    }

    #[test]
    fn test_wait_zero_timeout_keeps_recorded_state() {
        let uuid = Uuid::new_v4();
        let transport = ScriptedTransport::new();
        transport.push_json(200, task_instance_json(uuid, "published"));
        transport.push_json(200, task_instance_json(uuid, "running"));
        let client = scripted_client(&transport);

        let mut instance = client.container_task_instances().get(&uuid).unwrap();
        let err = instance
            .wait_until_finished(WaitOptions::new().with_timeout(Duration::ZERO))
            .unwrap_err();

        assert!(matches!(err, SdkError::Timeout(0)));
        assert_eq!(instance.state, TaskState::Published);
    }

    #[test]
    fn test_wait_polls_through_states() {
        let uuid = Uuid::new_v4();
        let transport = ScriptedTransport::new();
        transport.push_json(200, task_instance_json(uuid, "published"));
        transport.push_json(200, task_instance_json(uuid, "running"));
        transport.push_json(200, task_instance_json(uuid, "failed"));
        let client = scripted_client(&transport);

        let finished = client
            .container_task_instances()
            .wait_until_finished(
                &uuid,
                WaitOptions::new().with_poll_interval(Duration::from_millis(100)),
            )
            .unwrap();

        assert_eq!(finished.state, TaskState::Failed);
        assert_eq!(transport.request_count(), 3);
    }
}
