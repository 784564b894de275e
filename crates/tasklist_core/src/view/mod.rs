//! Presentation projection of the task list.
//!
//! # Responsibility
//! - Derive display rows and summary text from task state plus edit state.
//! - Stay free of any rendering technology so it can be unit-tested.
//!
//! # Invariants
//! - Projection is a pure function; it never mutates tasks.
//! - Display order is derived and never persisted.

pub mod projector;
