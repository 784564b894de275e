use chrono::{TimeZone, Utc};
use tasklist_core::db::{open_db, open_db_in_memory};
use tasklist_core::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, Task, TaskId, TaskStore,
};

fn sample_tasks() -> Vec<Task> {
    let mut first = Task::with_id(
        TaskId::from("a"),
        "Buy milk",
        Utc.timestamp_millis_opt(1_000).unwrap(),
    )
    .unwrap();
    first.completed = true;
    let second = Task::new("Walk dog", Utc.timestamp_millis_opt(2_500).unwrap()).unwrap();
    vec![first, second]
}

#[test]
fn save_then_load_roundtrip_preserves_fields_and_order() {
    let mut store = TaskStore::new(MemoryKeyValueStore::new());
    let tasks = sample_tasks();

    store.save(&tasks).unwrap();

    assert_eq!(store.try_load().unwrap(), tasks);
    assert_eq!(store.load(), tasks);
}

#[test]
fn sqlite_roundtrip_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    let tasks = sample_tasks();

    {
        let backend = SqliteKeyValueStore::try_new(open_db(&path).unwrap()).unwrap();
        let mut store = TaskStore::new(backend);
        store.save(&tasks).unwrap();
    }

    let backend = SqliteKeyValueStore::try_new(open_db(&path).unwrap()).unwrap();
    let mut store = TaskStore::new(backend);
    assert_eq!(store.load(), tasks);
}

#[test]
fn absent_slot_loads_as_empty() {
    let mut store = TaskStore::new(MemoryKeyValueStore::new());
    assert!(store.try_load().unwrap().is_empty());
    assert!(store.load().is_empty());
}

#[test]
fn save_overwrites_previous_value() {
    let mut store = TaskStore::new(MemoryKeyValueStore::new());
    store.save(&sample_tasks()).unwrap();
    store.save(&[]).unwrap();

    assert!(store.try_load().unwrap().is_empty());
    assert_eq!(store.backend().get("tasks").unwrap().as_deref(), Some("[]"));
}

#[test]
fn malformed_json_is_reported_by_try_load() {
    let mut backend = MemoryKeyValueStore::new();
    backend.set("tasks", "{not json").unwrap();
    let store = TaskStore::new(backend);

    let err = store.try_load().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "tasks"));
}

#[test]
fn corrupt_state_resets_to_empty_and_clears_slot() {
    let mut backend = MemoryKeyValueStore::new();
    backend.set("tasks", "[{\"id\":\"x\"}]").unwrap();
    let mut store = TaskStore::new(backend);

    assert!(store.load().is_empty());
    assert_eq!(store.backend().get("tasks").unwrap(), None);
}

#[test]
fn blob_written_by_earlier_versions_is_accepted() {
    let legacy = r#"[
        {"id":"1714557600000","text":"Buy milk","completed":false,"createdAt":"2024-05-01T10:00:00.000Z"},
        {"id":"1714557660000","text":"Walk dog","completed":true,"createdAt":"2024-05-01T10:01:00.000Z"}
    ]"#;
    let mut backend = MemoryKeyValueStore::new();
    backend.set("tasks", legacy).unwrap();
    let mut store = TaskStore::new(backend);

    let tasks = store.load();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, TaskId::from("1714557600000"));
    assert!(tasks[1].completed);
}

#[test]
fn custom_key_uses_its_own_slot() {
    let backend = SqliteKeyValueStore::try_new(open_db_in_memory().unwrap()).unwrap();
    let mut store = TaskStore::with_key(backend, "work");
    store.save(&sample_tasks()).unwrap();

    assert_eq!(store.key(), "work");
    assert!(store.backend().get("tasks").unwrap().is_none());
    assert!(store.backend().get("work").unwrap().is_some());
}
