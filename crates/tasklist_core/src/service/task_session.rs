//! Task session: one repository plus transient edit state.
//!
//! # Responsibility
//! - Run the action -> mutation -> persist -> re-render flow.
//! - Own the single editing id for the session.
//!
//! # Invariants
//! - The editing id, when set, always names a task present in the repository.
//! - Every action returns a projection computed after the mutation.

use crate::model::task::{Clock, SystemClock, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use crate::store::{KeyValueStore, TaskStore};
use crate::view::projector::{project, EditState, ListProjection};
use log::debug;

/// Application session constructed once and handed to the UI layer.
pub struct TaskSession<S: KeyValueStore, C: Clock = SystemClock> {
    repo: TaskRepository<S, C>,
    edit: EditState,
}

impl<S: KeyValueStore> TaskSession<S, SystemClock> {
    /// Opens a session over the persisted collection.
    pub fn open(store: TaskStore<S>) -> Self {
        Self::new(TaskRepository::open(store))
    }
}

impl<S: KeyValueStore, C: Clock> TaskSession<S, C> {
    pub fn new(repo: TaskRepository<S, C>) -> Self {
        Self {
            repo,
            edit: EditState::new(),
        }
    }

    pub fn repository(&self) -> &TaskRepository<S, C> {
        &self.repo
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Current projection; no state changes.
    pub fn render(&self) -> ListProjection {
        project(self.repo.tasks(), &self.edit)
    }

    /// Adds a task; blank text is ignored.
    pub fn add(&mut self, text: &str) -> RepoResult<ListProjection> {
        self.repo.add(text)?;
        Ok(self.render())
    }

    pub fn toggle_complete(&mut self, id: &TaskId) -> RepoResult<ListProjection> {
        self.repo.toggle_complete(id)?;
        Ok(self.render())
    }

    /// Switches `id` into inline-edit mode.
    ///
    /// Unknown ids leave the current edit state untouched.
    pub fn start_editing(&mut self, id: &TaskId) -> ListProjection {
        if self.repo.contains(id) {
            self.edit.start(id.clone());
            debug!("event=edit_start module=session status=ok id={id}");
        } else {
            debug!("event=edit_start module=session status=skipped reason=not_found id={id}");
        }
        self.render()
    }

    /// Saves the edited text and leaves edit mode.
    ///
    /// Blank text deletes the task.
    pub fn save_edit(&mut self, id: &TaskId, text: &str) -> RepoResult<ListProjection> {
        self.repo.set_text(id, text)?;
        self.edit.clear();
        Ok(self.render())
    }

    pub fn delete(&mut self, id: &TaskId) -> RepoResult<ListProjection> {
        self.repo.delete(id)?;
        if self.edit.clear_if(id) {
            debug!("event=edit_cancel module=session status=ok reason=deleted id={id}");
        }
        Ok(self.render())
    }
}
