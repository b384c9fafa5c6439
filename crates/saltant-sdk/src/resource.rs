// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Traits describing what a manager can do with a resource record.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A server-side resource decoded from JSON.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// How the resource is addressed in URLs.
    type Id: fmt::Display + fmt::Debug + Clone + Send + Sync;

    /// Human-readable kind, used in logs.
    const KIND: &'static str;

    /// The resource's identifier.
    fn id(&self) -> Self::Id;
}

/// A resource the SDK can create.
pub trait Creatable: Resource {
    /// Body of the create request.
    type Create: Serialize;
}

/// A resource whose mutable fields can be written back.
pub trait Updatable: Resource {
    /// Body of a full update.
    type Update: Serialize;

    /// Current mutable fields, as sent by `put`.
    fn update_payload(&self) -> Self::Update;
}

/// A resource with a unique name the server can filter on.
pub trait Named: Resource {
    fn name(&self) -> &str;
}
