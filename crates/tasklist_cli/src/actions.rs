//! Maps parsed commands onto session operations.
//!
//! Row numbers are 1-based positions in the current display order, not in
//! canonical order.

use crate::command::Command;
use tasklist_core::{Clock, KeyValueStore, ListProjection, TaskId, TaskSession};

/// Applies one command and returns the projection to render.
pub fn run<S: KeyValueStore, C: Clock>(
    session: &mut TaskSession<S, C>,
    command: Command,
) -> Result<ListProjection, String> {
    let result = match command {
        Command::List | Command::Quit => return Ok(session.render()),
        Command::Add { text } => session.add(&text.join(" ")),
        Command::Toggle { row } => {
            let id = row_id(session, row)?;
            session.toggle_complete(&id)
        }
        Command::Edit { row } => {
            let id = row_id(session, row)?;
            return Ok(session.start_editing(&id));
        }
        Command::Save { text } => {
            let id = session
                .edit_state()
                .editing_id()
                .cloned()
                .ok_or_else(|| "nothing is being edited; use `edit <n>` first".to_string())?;
            session.save_edit(&id, &text.join(" "))
        }
        Command::Delete { row } => {
            let id = row_id(session, row)?;
            session.delete(&id)
        }
    };
    result.map_err(|err| err.to_string())
}

/// Maps a 1-based display row to its task id.
fn row_id<S: KeyValueStore, C: Clock>(
    session: &TaskSession<S, C>,
    row: usize,
) -> Result<TaskId, String> {
    let projection = session.render();
    row.checked_sub(1)
        .and_then(|index| projection.list.rows().get(index))
        .map(|task_row| task_row.id.clone())
        .ok_or_else(|| format!("no task at row {row}"))
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::command::parse_command;
    use chrono::{DateTime, TimeZone, Utc};
    use std::cell::Cell;
    use tasklist_core::{
        Clock, KeyValueStore, ListProjection, MemoryKeyValueStore, TaskRepository, TaskSession,
        TaskStore,
    };

    /// Hands out timestamps one second apart.
    struct StepClock {
        next_millis: Cell<i64>,
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let millis = self.next_millis.get();
            self.next_millis.set(millis + 1_000);
            Utc.timestamp_millis_opt(millis).unwrap()
        }
    }

    type Session = TaskSession<Box<dyn KeyValueStore>, StepClock>;

    fn session() -> Session {
        let backend: Box<dyn KeyValueStore> = Box::new(MemoryKeyValueStore::new());
        let clock = StepClock {
            next_millis: Cell::new(1_700_000_000_000),
        };
        TaskSession::new(TaskRepository::open_with_clock(TaskStore::new(backend), clock))
    }

    fn exec(session: &mut Session, line: &str) -> Result<ListProjection, String> {
        let command = parse_command(line).unwrap().unwrap();
        run(session, command)
    }

    fn row_texts(projection: &ListProjection) -> Vec<&str> {
        projection
            .list
            .rows()
            .iter()
            .map(|row| row.text.as_str())
            .collect()
    }

    #[test]
    fn toggle_targets_top_display_row() {
        let mut session = session();
        exec(&mut session, "add first").unwrap();
        let projection = exec(&mut session, "add second").unwrap();
        assert_eq!(row_texts(&projection), vec!["second", "first"]);

        let projection = exec(&mut session, "toggle 1").unwrap();

        let tasks = session.repository().tasks();
        assert_eq!(tasks[0].text, "first");
        assert!(!tasks[0].completed);
        assert_eq!(tasks[1].text, "second");
        assert!(tasks[1].completed);
        assert_eq!(row_texts(&projection), vec!["first", "second"]);
    }

    #[test]
    fn edit_then_save_rewrites_text_and_leaves_edit_mode() {
        let mut session = session();
        exec(&mut session, "add first").unwrap();
        exec(&mut session, "add second").unwrap();

        let projection = exec(&mut session, "edit 2").unwrap();
        assert!(projection.list.rows()[1].is_editing());

        let projection = exec(&mut session, "save first draft").unwrap();
        assert_eq!(row_texts(&projection), vec!["second", "first draft"]);
        assert!(session.edit_state().editing_id().is_none());
    }

    #[test]
    fn save_without_edit_is_rejected() {
        let mut session = session();
        exec(&mut session, "add first").unwrap();

        let err = exec(&mut session, "save y").unwrap_err();

        assert!(err.contains("nothing is being edited"));
        assert_eq!(session.repository().tasks()[0].text, "first");
    }

    #[test]
    fn rows_outside_the_list_are_rejected() {
        let mut session = session();
        exec(&mut session, "add only").unwrap();

        assert_eq!(exec(&mut session, "toggle 0").unwrap_err(), "no task at row 0");
        assert_eq!(exec(&mut session, "delete 5").unwrap_err(), "no task at row 5");
        assert_eq!(session.repository().len(), 1);
    }

    #[test]
    fn saving_blank_text_deletes_the_task() {
        let mut session = session();
        exec(&mut session, "add doomed").unwrap();
        exec(&mut session, "edit 1").unwrap();

        let projection = exec(&mut session, "save").unwrap();

        assert!(session.repository().is_empty());
        assert!(projection.list.rows().is_empty());
        assert!(session.edit_state().editing_id().is_none());
    }
}
