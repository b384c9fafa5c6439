// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Container and executable task types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Creatable, Named, Resource, Updatable};

/// Container runtime for a container task type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    #[default]
    Docker,
    Singularity,
}

/// A task type run inside a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerTaskType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Username of the owner.
    pub user: String,
    pub datetime_created: DateTime<Utc>,
    /// Command run inside the container.
    pub command_to_run: String,
    /// Environment variables required on the host.
    #[serde(default)]
    pub environment_variables: Vec<String>,
    /// Argument names instances must supply.
    #[serde(default)]
    pub required_arguments: Vec<String>,
    #[serde(default)]
    pub required_arguments_default_values: serde_json::Map<String, serde_json::Value>,
    /// Logs directory inside the container.
    #[serde(default)]
    pub logs_path: String,
    /// Results directory inside the container.
    #[serde(default)]
    pub results_path: String,
    /// Image reference, e.g. `ubuntu:14.04` or `docker://ubuntu:14.04`.
    pub container_image: String,
    pub container_type: ContainerType,
}

impl fmt::Display for ContainerTaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.user)
    }
}

/// A task type run as a command on the worker host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutableTaskType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Username of the owner.
    pub user: String,
    pub datetime_created: DateTime<Utc>,
    pub command_to_run: String,
    #[serde(default)]
    pub environment_variables: Vec<String>,
    #[serde(default)]
    pub required_arguments: Vec<String>,
    #[serde(default)]
    pub required_arguments_default_values: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Display for ExecutableTaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.user)
    }
}

/// Fields for creating or fully updating a container task type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerTaskTypeOptions {
    pub name: String,
    pub description: String,
    pub command_to_run: String,
    pub environment_variables: Vec<String>,
    pub required_arguments: Vec<String>,
    pub required_arguments_default_values: serde_json::Map<String, serde_json::Value>,
    pub logs_path: String,
    pub results_path: String,
    pub container_image: String,
    pub container_type: ContainerType,
}

impl ContainerTaskTypeOptions {
    /// Create options with the required fields.
    pub fn new(
        name: impl Into<String>,
        command_to_run: impl Into<String>,
        container_image: impl Into<String>,
        container_type: ContainerType,
    ) -> Self {
        Self {
            name: name.into(),
            command_to_run: command_to_run.into(),
            container_image: container_image.into(),
            container_type,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_logs_path(mut self, path: impl Into<String>) -> Self {
        self.logs_path = path.into();
        self
    }

    pub fn with_results_path(mut self, path: impl Into<String>) -> Self {
        self.results_path = path.into();
        self
    }

    pub fn with_environment_variable(mut self, name: impl Into<String>) -> Self {
        self.environment_variables.push(name.into());
        self
    }

    /// Add a required argument, optionally with a default value.
    pub fn with_required_argument(
        mut self,
        name: impl Into<String>,
        default: Option<serde_json::Value>,
    ) -> Self {
        let name = name.into();
        if let Some(value) = default {
            self.required_arguments_default_values
                .insert(name.clone(), value);
        }
        self.required_arguments.push(name);
        self
    }
}

/// Fields for creating or fully updating an executable task type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutableTaskTypeOptions {
    pub name: String,
    pub description: String,
    pub command_to_run: String,
    pub environment_variables: Vec<String>,
    pub required_arguments: Vec<String>,
    pub required_arguments_default_values: serde_json::Map<String, serde_json::Value>,
}

impl ExecutableTaskTypeOptions {
    pub fn new(name: impl Into<String>, command_to_run: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command_to_run: command_to_run.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_environment_variable(mut self, name: impl Into<String>) -> Self {
        self.environment_variables.push(name.into());
        self
    }

    /// Add a required argument, optionally with a default value.
    pub fn with_required_argument(
        mut self,
        name: impl Into<String>,
        default: Option<serde_json::Value>,
    ) -> Self {
        let name = name.into();
        if let Some(value) = default {
            self.required_arguments_default_values
                .insert(name.clone(), value);
        }
        self.required_arguments.push(name);
        self
    }
}

impl Resource for ContainerTaskType {
    type Id = i64;
    const KIND: &'static str = "container task type";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Creatable for ContainerTaskType {
    type Create = ContainerTaskTypeOptions;
}

impl Updatable for ContainerTaskType {
    type Update = ContainerTaskTypeOptions;

    fn update_payload(&self) -> ContainerTaskTypeOptions {
        ContainerTaskTypeOptions {
            name: self.name.clone(),
            description: self.description.clone(),
            command_to_run: self.command_to_run.clone(),
            environment_variables: self.environment_variables.clone(),
            required_arguments: self.required_arguments.clone(),
            required_arguments_default_values: self.required_arguments_default_values.clone(),
            logs_path: self.logs_path.clone(),
            results_path: self.results_path.clone(),
            container_image: self.container_image.clone(),
            container_type: self.container_type,
        }
    }
}

impl Named for ContainerTaskType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for ExecutableTaskType {
    type Id = i64;
    const KIND: &'static str = "executable task type";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Creatable for ExecutableTaskType {
    type Create = ExecutableTaskTypeOptions;
}

impl Updatable for ExecutableTaskType {
    type Update = ExecutableTaskTypeOptions;

    fn update_payload(&self) -> ExecutableTaskTypeOptions {
        ExecutableTaskTypeOptions {
            name: self.name.clone(),
            description: self.description.clone(),
            command_to_run: self.command_to_run.clone(),
            environment_variables: self.environment_variables.clone(),
            required_arguments: self.required_arguments.clone(),
            required_arguments_default_values: self.required_arguments_default_values.clone(),
        }
    }
}

impl Named for ExecutableTaskType {
    fn name(&self) -> &str {
        &self.name
    }
}
