//! JSON codec for the persisted task list.
//!
//! # Invariants
//! - The slot holds one JSON array of task objects in list order.
//! - Decoding rejects invalid records and duplicate ids as a whole.

use crate::model::task::{Task, TaskValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised while decoding a stored task list.
#[derive(Debug)]
pub enum TaskCodecError {
    Json(serde_json::Error),
    InvalidTask {
        index: usize,
        source: TaskValidationError,
    },
    DuplicateId(String),
}

impl Display for TaskCodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed task list: {err}"),
            Self::InvalidTask { index, source } => {
                write!(f, "invalid task at index {index}: {source}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate task id `{id}`"),
        }
    }
}

impl Error for TaskCodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidTask { source, .. } => Some(source),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for TaskCodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes the full list for a slot overwrite.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, TaskCodecError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parses and validates a stored list.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, TaskCodecError> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        task.validate()
            .map_err(|source| TaskCodecError::InvalidTask { index, source })?;
        if !seen.insert(task.id.as_str()) {
            return Err(TaskCodecError::DuplicateId(task.id.clone()));
        }
    }
    Ok(tasks)
}
