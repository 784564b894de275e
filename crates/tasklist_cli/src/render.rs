//! Plain-text rendering of a list projection.

use tasklist_core::{ListProjection, RowMode, TaskListView};

pub fn render(projection: &ListProjection) -> String {
    let mut out = String::new();

    match &projection.list {
        TaskListView::Empty { message } => {
            out.push_str(message);
            out.push('\n');
        }
        TaskListView::Rows(rows) => {
            for (index, row) in rows.iter().enumerate() {
                let checkbox = if row.completed { "[x]" } else { "[ ]" };
                let marker = match row.mode {
                    RowMode::View => ' ',
                    RowMode::Editing { .. } => '*',
                };
                let actions = row
                    .actions
                    .iter()
                    .map(|action| action.label())
                    .collect::<Vec<_>>()
                    .join("/");
                out.push_str(&format!(
                    "{:>3}. {checkbox}{marker}{}  ({actions})\n",
                    index + 1,
                    row.text
                ));
            }
        }
    }

    out.push_str(&projection.summary.total);
    out.push_str(" | ");
    out.push_str(&projection.summary.completed);
    out
}
