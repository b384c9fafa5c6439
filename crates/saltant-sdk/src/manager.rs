// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Generic resource manager and the models it produces.
//!
//! A [`ResourceManager`] knows one endpoint (e.g. `taskqueues/`) and turns
//! calls into requests against it. Every call makes exactly one round trip
//! and never retries. Decoded records are wrapped in a [`Model`], which keeps
//! a handle to its manager so it can update or refresh itself.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use saltant_http::Method;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::api::Api;
use crate::error::{Result, SdkError};
use crate::resource::{Creatable, Named, Resource, Updatable};

/// Query filters for `list`, passed to the server verbatim.
///
/// The server's filter vocabulary is not validated client-side; an unknown
/// filter is either ignored by the server or rejected with its own error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    params: Vec<(String, String)>,
}

impl ListFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary filter.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Exact id match.
    pub fn id(self, id: impl ToString) -> Self {
        self.with("id", id)
    }

    /// Exact name match.
    pub fn name(self, name: impl Into<String>) -> Self {
        self.with("name", name.into())
    }

    /// Case-insensitive regex on name.
    pub fn name_iregex(self, pattern: impl Into<String>) -> Self {
        self.with("name__iregex", pattern.into())
    }

    /// Owner's username.
    pub fn user(self, username: impl Into<String>) -> Self {
        self.with("user__username", username.into())
    }

    /// Task instance state.
    ///
    /// [`TaskState::Unknown`](crate::TaskState::Unknown) is a decoding
    /// fallback, not a server state: it is sent as `state=unknown`, which the
    /// server rejects as an invalid choice ([`SdkError::Validation`]).
    pub fn state(self, state: crate::types::TaskState) -> Self {
        self.with("state", state.as_str())
    }

    /// Page number, for paginated endpoints.
    pub fn page(self, page: u32) -> Self {
        self.with("page", page)
    }

    /// Page size, for paginated endpoints.
    pub fn page_size(self, size: u32) -> Self {
        self.with("page_size", size)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Manager for one resource endpoint.
pub struct ResourceManager<R> {
    api: Arc<Api>,
    path: &'static str,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceManager<R> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            path: self.path,
            _resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for ResourceManager<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceManager")
            .field("root", &self.api.root().as_str())
            .field("path", &self.path)
            .finish()
    }
}

impl<R: Resource> ResourceManager<R> {
    pub(crate) fn new(api: Arc<Api>, path: &'static str) -> Self {
        Self {
            api,
            path,
            _resource: PhantomData,
        }
    }

    /// Endpoint path relative to the API root, without slashes.
    pub fn path(&self) -> &'static str {
        self.path
    }

    pub(crate) fn api(&self) -> &Api {
        &self.api
    }

    /// List resources matching the filters.
    ///
    /// Accepts both a bare JSON array and a paginated envelope; for the
    /// latter only the returned page's `results` are used.
    #[instrument(skip(self, filters), fields(kind = R::KIND))]
    pub fn list(&self, filters: &ListFilters) -> Result<Vec<Model<R>>> {
        let url = self.api.endpoint(&[self.path])?;
        let value: serde_json::Value =
            self.api
                .request(Method::Get, &url, filters.params(), None)?;

        let items = match value {
            serde_json::Value::Object(mut page) => page.remove("results").ok_or_else(|| {
                SdkError::Serialization(format!(
                    "list response from {} has no results field",
                    url
                ))
            })?,
            other => other,
        };

        let records: Vec<R> = serde_json::from_value(items)?;
        debug!(count = records.len(), "Listed resources");
        Ok(records.into_iter().map(|r| self.model(r)).collect())
    }

    /// Get one resource by id.
    #[instrument(skip(self, id), fields(kind = R::KIND, id = %id))]
    pub fn get(&self, id: &R::Id) -> Result<Model<R>> {
        self.fetch(id).map(|r| self.model(r))
    }

    pub(crate) fn fetch(&self, id: &R::Id) -> Result<R> {
        let url = self.detail_url(id, None)?;
        self.api.request(Method::Get, &url, &[], None)
    }

    pub(crate) fn model(&self, data: R) -> Model<R> {
        Model {
            data,
            manager: self.clone(),
        }
    }

    /// POST to `{id}/{action}/` and decode the returned record.
    pub(crate) fn action(&self, id: &R::Id, action: &str) -> Result<R> {
        let url = self.detail_url(id, Some(action))?;
        self.api.request(Method::Post, &url, &[], None)
    }

    fn detail_url(&self, id: &R::Id, action: Option<&str>) -> Result<url::Url> {
        let id = id.to_string();
        match action {
            Some(action) => self.api.endpoint(&[self.path, &id, action]),
            None => self.api.endpoint(&[self.path, &id]),
        }
    }
}

impl<R: Named> ResourceManager<R> {
    /// Get a resource by its exact name.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub fn get_by_name(&self, name: &str) -> Result<Model<R>> {
        self.list(&ListFilters::new().name(name))?
            .into_iter()
            .next()
            .ok_or_else(|| SdkError::NotFound {
                url: format!("{}{}/?name={}", self.api.root(), self.path, name),
                message: format!("no {} named {}", R::KIND, name),
            })
    }
}

impl<R: Creatable> ResourceManager<R> {
    /// Create a resource; validation is left to the server.
    #[instrument(skip(self, options), fields(kind = R::KIND))]
    pub fn create(&self, options: &R::Create) -> Result<Model<R>> {
        let url = self.api.endpoint(&[self.path])?;
        let body = serde_json::to_value(options)?;
        let created: R = self.api.request(Method::Post, &url, &[], Some(body))?;
        info!(id = %created.id(), "Created resource");
        Ok(self.model(created))
    }
}

impl<R: Updatable> ResourceManager<R> {
    /// Replace a resource's mutable fields.
    #[instrument(skip(self, id, update), fields(kind = R::KIND, id = %id))]
    pub fn put(&self, id: &R::Id, update: &R::Update) -> Result<Model<R>> {
        self.update(Method::Put, id, serde_json::to_value(update)?)
    }

    /// Partially update a resource with only the given fields.
    #[instrument(skip(self, id, changes), fields(kind = R::KIND, id = %id))]
    pub fn patch<T: Serialize + ?Sized>(&self, id: &R::Id, changes: &T) -> Result<Model<R>> {
        self.update(Method::Patch, id, serde_json::to_value(changes)?)
    }

    fn update(&self, method: Method, id: &R::Id, body: serde_json::Value) -> Result<Model<R>> {
        let url = self.detail_url(id, None)?;
        let updated: R = self.api.request(method, &url, &[], Some(body))?;
        info!(%method, "Updated resource");
        Ok(self.model(updated))
    }
}

/// A snapshot of one resource, bound to the manager that produced it.
///
/// Fields are read through `Deref`. The snapshot never refreshes on its
/// own; call [`Model::refresh`] to re-fetch.
pub struct Model<R: Resource> {
    data: R,
    manager: ResourceManager<R>,
}

impl<R: Resource> Model<R> {
    pub fn data(&self) -> &R {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut R {
        &mut self.data
    }

    pub fn into_inner(self) -> R {
        self.data
    }

    pub fn manager(&self) -> &ResourceManager<R> {
        &self.manager
    }

    /// Re-fetch and replace the local fields.
    pub fn refresh(&mut self) -> Result<()> {
        self.data = self.manager.fetch(&self.data.id())?;
        Ok(())
    }

    pub(crate) fn replace(&mut self, data: R) {
        self.data = data;
    }
}

impl<R: Updatable> Model<R> {
    /// Write the local mutable fields back and take the server's response.
    pub fn put(&mut self) -> Result<()> {
        let updated = self
            .manager
            .put(&self.data.id(), &self.data.update_payload())?;
        self.data = updated.data;
        Ok(())
    }

    /// Send a partial update and take the server's response.
    pub fn patch<T: Serialize + ?Sized>(&mut self, changes: &T) -> Result<()> {
        let updated = self.manager.patch(&self.data.id(), changes)?;
        self.data = updated.data;
        Ok(())
    }
}

impl<R: Resource> Deref for Model<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.data
    }
}

impl<R: Resource> DerefMut for Model<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.data
    }
}

impl<R: Resource> Clone for Model<R> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            manager: self.manager.clone(),
        }
    }
}

impl<R: Resource + fmt::Debug> fmt::Debug for Model<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.data.fmt(f)
    }
}

impl<R: Resource + fmt::Display> fmt::Display for Model<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.data.fmt(f)
    }
}
