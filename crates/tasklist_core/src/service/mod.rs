//! Session-level use-case services.
//!
//! # Responsibility
//! - Wire user actions to repository mutations and re-projection.
//! - Keep UI layers decoupled from storage details.

pub mod task_session;
