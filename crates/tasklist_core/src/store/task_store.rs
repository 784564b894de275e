//! Task collection adapter over a single key-value slot.
//!
//! # Responsibility
//! - Encode the full collection as one JSON array in canonical order.
//! - Decode it back, rejecting anything that is not a valid collection.
//! - Offer a fail-soft `load` that resets corrupt state to empty.
//!
//! # Invariants
//! - `save` always writes the whole collection; there are no partial writes.
//! - A decoded collection never contains duplicate ids or blank text.

use super::{KeyValueStore, StoreError, StoreResult};
use crate::model::task::Task;
use log::{debug, error, warn};
use std::collections::HashSet;

/// Slot name used when no override is configured.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Reads and writes the task collection from one fixed slot.
pub struct TaskStore<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Binds the store to the default `tasks` slot.
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Loads the persisted collection, surfacing corrupt state as an error.
    ///
    /// An absent slot is an empty collection, not an error.
    pub fn try_load(&self) -> StoreResult<Vec<Task>> {
        let Some(blob) = self.backend.get(&self.key)? else {
            return Ok(Vec::new());
        };
        decode_tasks(&self.key, &blob)
    }

    /// Loads the persisted collection, degrading to empty on any failure.
    ///
    /// Corrupt slots are cleared so the next session starts clean.
    pub fn load(&mut self) -> Vec<Task> {
        match self.try_load() {
            Ok(tasks) => {
                debug!(
                    "event=store_load module=store status=ok key={} count={}",
                    self.key,
                    tasks.len()
                );
                tasks
            }
            Err(err @ StoreError::Corrupt { .. }) => {
                warn!(
                    "event=store_load module=store status=reset key={} error_code=corrupt_state error={}",
                    self.key, err
                );
                if let Err(remove_err) = self.backend.remove(&self.key) {
                    error!(
                        "event=store_reset module=store status=error key={} error={}",
                        self.key, remove_err
                    );
                }
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error key={} error_code=read_failed error={}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the slot with the full collection.
    pub fn save(&mut self, tasks: &[Task]) -> StoreResult<()> {
        let blob = serde_json::to_string(tasks).map_err(StoreError::Encode)?;
        self.backend.set(&self.key, &blob)?;
        debug!(
            "event=store_save module=store status=ok key={} count={} bytes={}",
            self.key,
            tasks.len(),
            blob.len()
        );
        Ok(())
    }
}

fn decode_tasks(key: &str, blob: &str) -> StoreResult<Vec<Task>> {
    let corrupt = |message: String| StoreError::Corrupt {
        key: key.to_string(),
        message,
    };

    let tasks: Vec<Task> = serde_json::from_str(blob).map_err(|err| corrupt(err.to_string()))?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(&task.id) {
            return Err(corrupt(format!("duplicate task id `{}`", task.id)));
        }
    }

    Ok(tasks)
}
