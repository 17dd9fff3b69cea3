//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record persisted by the task store.
//! - Provide constructors that normalize user input.
//!
//! # Invariants
//! - `id` is stable and never reused for another task in the same list.
//! - `text` is trimmed and non-empty.
//! - `category` is fixed at creation time.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier for a task.
///
/// Kept as a plain string so ids written by other shells (timestamps,
/// UUIDs) load without conversion.
pub type TaskId = String;

/// Closed set of task categories chosen in the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    /// Important work, surfaced first by UI shells.
    Priority,
    /// Everyday task.
    #[default]
    Normal,
    /// Something to look forward to.
    Fun,
}

impl TaskCategory {
    /// All categories in display order.
    pub const ALL: [TaskCategory; 3] = [Self::Priority, Self::Normal, Self::Fun];

    /// Stable string id used on the wire and across FFI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Normal => "normal",
            Self::Fun => "fun",
        }
    }

    /// Parses a category from its wire string, ignoring case and padding.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "priority" => Some(Self::Priority),
            "normal" => Some(Self::Normal),
            "fun" => Some(Self::Fun),
            _ => None,
        }
    }
}

impl Display for TaskCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task id is empty or whitespace.
    EmptyId,
    /// Task text is empty or whitespace.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyText => write!(f, "task text must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Durable to-do record.
///
/// Serialized with exactly the fields `id`, `text`, `completed` and
/// `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub category: TaskCategory,
}

impl Task {
    /// Creates an open task with a freshly generated id.
    ///
    /// # Errors
    /// - Returns `EmptyText` when `text` is empty after trimming.
    pub fn new(text: &str, category: TaskCategory) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4().to_string(), text, category)
    }

    /// Creates an open task with a caller-provided id.
    ///
    /// Used by import paths where identity already exists.
    pub fn with_id(
        id: impl Into<TaskId>,
        text: &str,
        category: TaskCategory,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: id.into(),
            text: text.trim().to_string(),
            completed: false,
            category,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Flips completion and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}
