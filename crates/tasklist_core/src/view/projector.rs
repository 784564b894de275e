//! Task list projector.
//!
//! # Invariants
//! - Incomplete tasks come before completed ones.
//! - Within each group, newer `created_at` comes first; ties keep canonical
//!   order.
//! - At most one row is in editing mode, and only if its id is present.

use crate::model::task::{Task, TaskId};

/// Message shown when the collection is empty.
pub const EMPTY_LIST_MESSAGE: &str = "No tasks yet. Add a task to get started!";

/// Which task, if any, is shown as an inline-editable field.
///
/// Owned by the view layer and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    editing: Option<TaskId>,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing_id(&self) -> Option<&TaskId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: &TaskId) -> bool {
        self.editing.as_ref() == Some(id)
    }

    /// Puts `id` into edit mode, replacing any previous editing id.
    pub fn start(&mut self, id: TaskId) {
        self.editing = Some(id);
    }

    pub fn clear(&mut self) {
        self.editing = None;
    }

    /// Clears edit mode only when `id` is the one being edited.
    pub fn clear_if(&mut self, id: &TaskId) -> bool {
        if self.is_editing(id) {
            self.editing = None;
            return true;
        }
        false
    }
}

/// Per-row display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    /// Read-only text.
    View,
    /// Editable field, focused, with the input cursor at `cursor` chars.
    Editing { cursor: usize },
}

/// Controls rendered in a row's action area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Save,
    Delete,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Save => "Save",
            Self::Delete => "Delete",
        }
    }
}

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    /// Checkbox state; toggling it maps to `toggle_complete(id)`.
    pub completed: bool,
    pub mode: RowMode,
    pub actions: Vec<RowAction>,
}

impl TaskRow {
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, RowMode::Editing { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListView {
    Empty { message: &'static str },
    Rows(Vec<TaskRow>),
}

impl TaskListView {
    pub fn rows(&self) -> &[TaskRow] {
        match self {
            Self::Empty { .. } => &[],
            Self::Rows(rows) => rows,
        }
    }
}

/// The two read-only summary regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub total: String,
    pub completed: String,
}

/// Everything a renderer needs after one state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProjection {
    pub list: TaskListView,
    pub summary: SummaryView,
}

/// Sorts tasks into display order without touching the canonical list.
pub fn display_order(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    // sort_by is stable, so equal keys keep canonical order.
    ordered.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    ordered
}

/// Projects the list region.
pub fn project_list(tasks: &[Task], edit: &EditState) -> TaskListView {
    if tasks.is_empty() {
        return TaskListView::Empty {
            message: EMPTY_LIST_MESSAGE,
        };
    }

    let rows = display_order(tasks)
        .into_iter()
        .map(|task| project_row(task, edit))
        .collect();
    TaskListView::Rows(rows)
}

fn project_row(task: &Task, edit: &EditState) -> TaskRow {
    let (mode, primary) = if edit.is_editing(&task.id) {
        (
            RowMode::Editing {
                cursor: task.text.chars().count(),
            },
            RowAction::Save,
        )
    } else {
        (RowMode::View, RowAction::Edit)
    };

    TaskRow {
        id: task.id.clone(),
        text: task.text.clone(),
        completed: task.completed,
        mode,
        actions: vec![primary, RowAction::Delete],
    }
}

/// Computes the summary lines.
pub fn summarize(tasks: &[Task]) -> SummaryView {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let plural = if total == 1 { "" } else { "s" };

    SummaryView {
        total: format!("Total: {total} task{plural}"),
        completed: format!("Completed: {completed}"),
    }
}

/// Projects list and summary together.
pub fn project(tasks: &[Task], edit: &EditState) -> ListProjection {
    ListProjection {
        list: project_list(tasks, edit),
        summary: summarize(tasks),
    }
}

#[cfg(test)]
mod tests {
    use super::{summarize, EditState};
    use crate::model::task::TaskId;

    #[test]
    fn summary_for_empty_list_uses_plural() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, "Total: 0 tasks");
        assert_eq!(summary.completed, "Completed: 0");
    }

    #[test]
    fn clear_if_ignores_other_ids() {
        let mut edit = EditState::new();
        edit.start(TaskId::from("a"));

        assert!(!edit.clear_if(&TaskId::from("b")));
        assert!(edit.is_editing(&TaskId::from("a")));
        assert!(edit.clear_if(&TaskId::from("a")));
        assert_eq!(edit.editing_id(), None);
    }
}
