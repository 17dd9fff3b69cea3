//! Widget use-case services.
//!
//! # Responsibility
//! - Own the task list and keep its slot in sync (`task_store`).
//! - Turn editor input into store calls (`task_editor`).
//!
//! # Invariants
//! - Every list mutation goes through `TaskStore`.

pub mod task_editor;
pub mod task_store;
