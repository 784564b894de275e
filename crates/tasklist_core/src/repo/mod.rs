//! Repository layer over the persisted task collection.
//!
//! # Responsibility
//! - Own the in-memory canonical task list for one session.
//! - Persist every successful mutation through the store adapter.
//!
//! # Invariants
//! - The in-memory list only changes after the store accepted the new state.
//! - Not-found ids and blank input are no-ops, not errors.

pub mod task_repo;
