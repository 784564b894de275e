//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record and its identity type.
//! - Provide the clock seam used when stamping new tasks.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod task;
