//! Core domain logic for the task list.
//! This crate is the single source of truth for task invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Clock, SystemClock, Task, TaskId, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, TaskRepository, TaskStats};
pub use service::task_session::TaskSession;
pub use store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult, TaskStore,
};
pub use view::projector::{
    display_order, project, summarize, EditState, ListProjection, RowAction, RowMode,
    SummaryView, TaskListView, TaskRow,
};
