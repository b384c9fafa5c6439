// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Typed records for each saltant resource.
//!
//! Unknown fields in server responses are ignored; known fields are typed
//! and checked when the response is decoded.

mod task_instance;
mod task_queue;
mod task_type;
mod task_whitelist;
mod user;

pub use task_instance::{CreateTaskInstanceOptions, TaskInstance, TaskState};
pub use task_queue::{TaskQueue, TaskQueueOptions};
pub use task_type::{
    ContainerTaskType, ContainerTaskTypeOptions, ContainerType, ExecutableTaskType,
    ExecutableTaskTypeOptions,
};
pub use task_whitelist::{TaskWhitelist, TaskWhitelistOptions, TaskWhitelistPatch};
pub use user::User;
