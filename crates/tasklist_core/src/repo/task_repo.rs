//! Task repository: ordered collection plus persist-on-mutation.
//!
//! # Responsibility
//! - Provide add/toggle/set-text/delete over the canonical order.
//! - Keep the store slot in sync with the in-memory list.
//!
//! # Invariants
//! - Canonical order is insertion order; `add` appends.
//! - Each mutation saves the full next collection before committing it, so a
//!   failed save leaves the last good list in memory.
//! - Ids are sourced internally, so a missing id means "already gone".

use crate::model::task::{Clock, SystemClock, Task, TaskId, TaskValidationError};
use crate::store::{KeyValueStore, StoreError, TaskStore};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task mutations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "failed to persist tasks: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Aggregate counts over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
}

/// In-memory task list bound to one persistent slot.
pub struct TaskRepository<S: KeyValueStore, C: Clock = SystemClock> {
    store: TaskStore<S>,
    clock: C,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskRepository<S, SystemClock> {
    /// Loads the persisted collection using the wall clock for new tasks.
    pub fn open(store: TaskStore<S>) -> Self {
        Self::open_with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> TaskRepository<S, C> {
    /// Loads the persisted collection with an explicit clock.
    ///
    /// Corrupt or unreadable state yields an empty list (see `TaskStore::load`).
    pub fn open_with_clock(mut store: TaskStore<S>, clock: C) -> Self {
        let tasks = store.load();
        info!(
            "event=repo_open module=repo status=ok key={} count={}",
            store.key(),
            tasks.len()
        );
        Self {
            store,
            clock,
            tasks,
        }
    }

    /// Tasks in canonical (insertion) order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats {
            total: self.tasks.len(),
            completed: self.tasks.iter().filter(|task| task.completed).count(),
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    /// Appends a new incomplete task stamped with the current time.
    ///
    /// Returns `Ok(None)` without touching storage when `text` is blank.
    pub fn add(&mut self, text: &str) -> RepoResult<Option<Task>> {
        if text.trim().is_empty() {
            debug!("event=task_add module=repo status=skipped reason=blank_text");
            return Ok(None);
        }

        let task = Task::new(text, self.clock.now())?;
        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit("task_add", &task.id, next)?;
        Ok(Some(task))
    }

    /// Flips `completed` on the matching task.
    pub fn toggle_complete(&mut self, id: &TaskId) -> RepoResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(self.not_found("task_toggle", id));
        };

        let mut next = self.tasks.clone();
        next[index].completed = !next[index].completed;
        self.commit("task_toggle", id, next)?;
        Ok(true)
    }

    /// Replaces task text with the trimmed value; blank text deletes the task.
    pub fn set_text(&mut self, id: &TaskId, text: &str) -> RepoResult<bool> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.delete(id);
        }

        let Some(index) = self.position(id) else {
            return Ok(self.not_found("task_set_text", id));
        };
        if self.tasks[index].text == trimmed {
            return Ok(false);
        }

        let mut next = self.tasks.clone();
        next[index].text = trimmed.to_string();
        self.commit("task_set_text", id, next)?;
        Ok(true)
    }

    /// Removes the matching task.
    pub fn delete(&mut self, id: &TaskId) -> RepoResult<bool> {
        if !self.contains(id) {
            return Ok(self.not_found("task_delete", id));
        }

        let next = self
            .tasks
            .iter()
            .filter(|task| &task.id != id)
            .cloned()
            .collect();
        self.commit("task_delete", id, next)?;
        Ok(true)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    fn not_found(&self, event: &str, id: &TaskId) -> bool {
        debug!("event={event} module=repo status=skipped reason=not_found id={id}");
        false
    }

    fn commit(&mut self, event: &str, id: &TaskId, next: Vec<Task>) -> RepoResult<()> {
        if let Err(err) = self.store.save(&next) {
            error!(
                "event={event} module=repo status=error id={id} error_code=persist_failed error={err}"
            );
            return Err(err.into());
        }
        self.tasks = next;
        info!(
            "event={event} module=repo status=ok id={id} count={}",
            self.tasks.len()
        );
        Ok(())
    }
}
