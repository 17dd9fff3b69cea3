//! To-do domain model.
//!
//! # Responsibility
//! - Define the durable task record and its closed category set.
//! - Keep validation rules next to the data they guard.
//!
//! # Invariants
//! - Every task is identified by a non-empty `TaskId`.
//! - Task text is stored trimmed and never empty.

pub mod task;
