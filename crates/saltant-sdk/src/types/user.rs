// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Users. Read-only: the API offers no create or update.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// A saltant account, addressed by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

impl Resource for User {
    type Id = String;
    const KIND: &'static str = "user";

    fn id(&self) -> String {
        self.username.clone()
    }
}
