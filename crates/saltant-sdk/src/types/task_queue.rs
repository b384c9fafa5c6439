// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Task queues.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::{Creatable, Named, Resource, Updatable};

/// A named queue that task instances are submitted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQueue {
    pub id: i64,
    /// Username of the owner.
    pub user: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Only the owner may submit to a private queue.
    pub private: bool,
    /// Inactive queues accept no new instances.
    pub active: bool,
}

impl fmt::Display for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Fields for creating or fully updating a task queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQueueOptions {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub active: bool,
}

impl TaskQueueOptions {
    /// A public, active queue with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            private: false,
            active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Resource for TaskQueue {
    type Id = i64;
    const KIND: &'static str = "task queue";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Creatable for TaskQueue {
    type Create = TaskQueueOptions;
}

impl Updatable for TaskQueue {
    type Update = TaskQueueOptions;

    fn update_payload(&self) -> TaskQueueOptions {
        TaskQueueOptions {
            name: self.name.clone(),
            description: self.description.clone(),
            private: self.private,
            active: self.active,
        }
    }
}

impl Named for TaskQueue {
    fn name(&self) -> &str {
        &self.name
    }
}
