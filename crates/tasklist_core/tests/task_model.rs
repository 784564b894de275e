use chrono::{DateTime, TimeZone, Utc};
use tasklist_core::{Task, TaskId, TaskValidationError};

fn at_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

#[test]
fn new_task_starts_incomplete_with_fresh_id() {
    let task = Task::new("Buy milk", at_millis(1_700_000_000_000)).unwrap();

    assert!(!task.id.is_empty());
    assert_eq!(task.text, "Buy milk");
    assert!(!task.completed);
    assert_eq!(task.created_at, at_millis(1_700_000_000_000));
}

#[test]
fn blank_text_is_rejected() {
    let err = Task::new(" \t\n", at_millis(0)).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyText);
}

#[test]
fn empty_id_is_rejected() {
    let err = Task::with_id(TaskId::from(""), "text", at_millis(0)).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyId);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let mut task =
        Task::with_id(TaskId::from("1700000000000"), "Buy milk", at_millis(1_700_000_000_123))
            .unwrap();
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "1700000000000");
    assert_eq!(json["text"], "Buy milk");
    assert_eq!(json["completed"], true);
    assert_eq!(json["createdAt"], "2023-11-14T22:13:20.123Z");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn created_at_accepts_numeric_epoch_millis() {
    let value = serde_json::json!({
        "id": "a",
        "text": "numeric",
        "completed": false,
        "createdAt": 1_700_000_000_000_i64
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.created_at, at_millis(1_700_000_000_000));
}

#[test]
fn created_at_accepts_offset_timestamps() {
    let value = serde_json::json!({
        "id": "a",
        "text": "offset",
        "completed": false,
        "createdAt": "2024-05-01T12:00:00+02:00"
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
}

#[test]
fn deserialize_rejects_blank_text() {
    let value = serde_json::json!({
        "id": "a",
        "text": "   ",
        "completed": false,
        "createdAt": "2024-05-01T10:00:00.000Z"
    });

    let err = serde_json::from_value::<Task>(value).unwrap_err();
    assert!(
        err.to_string().contains("task text must not be empty"),
        "unexpected error: {err}"
    );
}
