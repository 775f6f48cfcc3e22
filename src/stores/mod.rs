// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side state for the API's collection resources.
//!
//! Stores never trust local edits: every successful write is followed by a
//! full reload of the collection. Deletes additionally prune the local copy
//! first so the removed entity disappears before the reload lands.

pub mod assets;
pub mod cards;
pub mod categories;
pub mod expenses;
pub mod installments;
pub mod monthly;
pub mod recurring;

use std::marker::PhantomData;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{ApiClient, Method, Query, item_path};
use crate::error::{ApiError, Result};
use crate::models::Identified;
use crate::notify::{Messages, Notifier, Toast, tracked};

/// Handles every store needs: the API and the notification sink.
#[derive(Clone)]
pub struct StoreContext {
    pub api: Rc<ApiClient>,
    pub notifier: Rc<dyn Notifier>,
}

impl StoreContext {
    pub fn new(api: Rc<ApiClient>, notifier: Rc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
    }

    fn fail(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.loading = false;
    }
}

/// Runs a collection request with the shared loading/error bookkeeping.
/// On success the caller installs the result.
fn load<T, R>(
    notifier: &dyn Notifier,
    state: &mut ResourceState<T>,
    failure: &'static str,
    request: impl FnOnce() -> Result<R>,
) -> Result<R> {
    state.begin();
    match request() {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(error = %err, "{}", failure);
            state.fail(failure);
            notifier.notify(Toast::Failure, failure);
            Err(err)
        }
    }
}

fn decode_created<T: DeserializeOwned>(path: &str, value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

/// A flat collection resource.
pub trait Resource {
    type Item: DeserializeOwned + Identified;
    type Input: Serialize;
    type Created: DeserializeOwned;

    /// Where the collection is read from.
    const LIST_PATH: &'static str;
    /// Where entities are created, and the prefix of `/{id}/` paths.
    const PATH: &'static str;
    const LOAD_FAILED: &'static str;
    const CREATE: Messages;
    const DELETE: Messages;

    /// Whether `item` is the entity behind `{PATH}{id}/`.
    fn owns(item: &Self::Item, id: i64) -> bool {
        item.id() == id
    }
}

/// Resources that accept edits.
pub trait Editable: Resource {
    /// `PATCH` for partial edits, `PUT` for full replacement.
    const UPDATE_METHOD: Method;
    const UPDATE: Messages;
}

pub struct CollectionStore<R: Resource> {
    ctx: StoreContext,
    state: ResourceState<R::Item>,
    query: Query,
    _resource: PhantomData<R>,
}

impl<R: Resource> CollectionStore<R> {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            ctx,
            state: ResourceState::default(),
            query: Query::new(),
            _resource: PhantomData,
        }
    }

    /// Scopes later reloads without fetching now.
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn items(&self) -> &[R::Item] {
        &self.state.items
    }

    pub fn state(&self) -> &ResourceState<R::Item> {
        &self.state
    }

    pub fn find(&self, id: i64) -> Option<&R::Item> {
        self.state.items.iter().find(|item| R::owns(item, id))
    }

    /// Reloads with the query of the previous fetch.
    pub fn fetch(&mut self) -> Result<()> {
        let query = self.query.clone();
        self.fetch_with(query)
    }

    pub fn fetch_with(&mut self, query: Query) -> Result<()> {
        self.query = query.clone();
        let api = &self.ctx.api;
        let items = load(
            self.ctx.notifier.as_ref(),
            &mut self.state,
            R::LOAD_FAILED,
            || api.get::<Vec<R::Item>>(R::LIST_PATH, query),
        )?;
        self.state.replace(items);
        Ok(())
    }

    /// Write-then-reload. A failed reload is already recorded in the state.
    fn refresh(&mut self) {
        if let Err(err) = self.fetch() {
            debug!(error = %err, path = R::LIST_PATH, "reload after write failed");
        }
    }

    pub fn create(&mut self, input: &R::Input) -> Result<R::Created> {
        let api = &self.ctx.api;
        let created = tracked(self.ctx.notifier.as_ref(), &R::CREATE, || {
            let value = api.post(R::PATH, input)?;
            decode_created(R::PATH, value)
        })?;
        self.refresh();
        Ok(created)
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        let api = &self.ctx.api;
        tracked(self.ctx.notifier.as_ref(), &R::DELETE, || {
            api.delete(&item_path(R::PATH, id))
        })?;
        self.state.items.retain(|item| !R::owns(item, id));
        self.refresh();
        Ok(())
    }
}

impl<R: Editable> CollectionStore<R> {
    pub fn update(&mut self, id: i64, input: &R::Input) -> Result<()> {
        let api = &self.ctx.api;
        let path = item_path(R::PATH, id);
        tracked(self.ctx.notifier.as_ref(), &R::UPDATE, || match R::UPDATE_METHOD {
            Method::Put => api.put(&path, input),
            _ => api.patch(&path, input),
        })?;
        self.refresh();
        Ok(())
    }
}
