// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Task whitelists: which task types may run on queues that reference them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::{Creatable, Named, Resource, Updatable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWhitelist {
    pub id: i64,
    /// Username of the owner.
    pub user: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Whitelisted container task type ids.
    #[serde(default)]
    pub whitelisted_container_task_types: Vec<i64>,
    /// Whitelisted executable task type ids.
    #[serde(default)]
    pub whitelisted_executable_task_types: Vec<i64>,
}

impl TaskWhitelist {
    pub fn allows_container_task_type(&self, id: i64) -> bool {
        self.whitelisted_container_task_types.contains(&id)
    }

    pub fn allows_executable_task_type(&self, id: i64) -> bool {
        self.whitelisted_executable_task_types.contains(&id)
    }
}

impl fmt::Display for TaskWhitelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Fields for creating or fully updating a task whitelist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWhitelistOptions {
    pub name: String,
    pub description: String,
    pub whitelisted_container_task_types: Vec<i64>,
    pub whitelisted_executable_task_types: Vec<i64>,
}

impl TaskWhitelistOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_container_task_types(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.whitelisted_container_task_types.extend(ids);
        self
    }

    pub fn with_executable_task_types(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.whitelisted_executable_task_types.extend(ids);
        self
    }
}

/// Partial update for a task whitelist; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskWhitelistPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelisted_container_task_types: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelisted_executable_task_types: Option<Vec<i64>>,
}

impl Resource for TaskWhitelist {
    type Id = i64;
    const KIND: &'static str = "task whitelist";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Creatable for TaskWhitelist {
    type Create = TaskWhitelistOptions;
}

impl Updatable for TaskWhitelist {
    type Update = TaskWhitelistOptions;

    fn update_payload(&self) -> TaskWhitelistOptions {
        TaskWhitelistOptions {
            name: self.name.clone(),
            description: self.description.clone(),
            whitelisted_container_task_types: self.whitelisted_container_task_types.clone(),
            whitelisted_executable_task_types: self.whitelisted_executable_task_types.clone(),
        }
    }
}

impl Named for TaskWhitelist {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedTransport, scripted_client};
    use saltant_http::Method;
    use serde_json::json;

    fn whitelist_json(id: i64, container: &[i64], executable: &[i64]) -> serde_json::Value {
        json!({
            "id": id,
            "user": "alice",
            "name": "trusted",
            "description": "",
            "whitelisted_container_task_types": container,
            "whitelisted_executable_task_types": executable
        })
    }

    #[test]
    fn test_create_then_get() {
        let transport = ScriptedTransport::new();
        transport.push_json(201, whitelist_json(2, &[3, 4], &[1]));
        transport.push_json(200, whitelist_json(2, &[3, 4], &[1]));
        let client = scripted_client(&transport);

        let options = TaskWhitelistOptions::new("trusted")
            .with_container_task_types([3, 4])
            .with_executable_task_types([1]);
        let created = client.task_whitelists().create(&options).unwrap();
        let fetched = client.task_whitelists().get(&created.id).unwrap();

        assert_eq!(created.data(), fetched.data());
        assert!(fetched.allows_container_task_type(4));

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://saltant.test/api/taskwhitelists/");
        assert_eq!(
            requests[0].body,
            Some(json!({
                "name": "trusted",
                "description": "",
                "whitelisted_container_task_types": [3, 4],
                "whitelisted_executable_task_types": [1]
            }))
        );
        assert_eq!(requests[1].url, "http://saltant.test/api/taskwhitelists/2/");
    }

    #[test]
    fn test_put_sends_full_payload() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, whitelist_json(2, &[3], &[]));
        let client = scripted_client(&transport);
        let mut whitelist = client.task_whitelists().get(&2).unwrap();

        whitelist.whitelisted_executable_task_types.push(7);
        transport.push_json(200, whitelist_json(2, &[3], &[7]));

        whitelist.put().unwrap();
        assert!(whitelist.allows_executable_task_type(7));

        let request = transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(
            request.body,
            Some(json!({
                "name": "trusted",
                "description": "",
                "whitelisted_container_task_types": [3],
                "whitelisted_executable_task_types": [7]
            }))
        );
    }

    #[test]
    fn test_patch_sends_only_set_fields() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, whitelist_json(2, &[3], &[]));
        let client = scripted_client(&transport);
        let mut whitelist = client.task_whitelists().get(&2).unwrap();

        transport.push_json(200, whitelist_json(2, &[], &[]));
        let patch = TaskWhitelistPatch {
            whitelisted_container_task_types: Some(Vec::new()),
            ..Default::default()
        };
        whitelist.patch(&patch).unwrap();

        assert!(whitelist.whitelisted_container_task_types.is_empty());
        let request = transport.last_request();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.url, "http://saltant.test/api/taskwhitelists/2/");
        assert_eq!(
            request.body,
            Some(json!({"whitelisted_container_task_types": []}))
        );
    }
}
