//! Widget configuration.
//!
//! # Invariants
//! - `celebration_ttl` applies per marker from its own creation time.

use crate::model::task::TaskCategory;
use std::time::Duration;

/// Slot key used when the shell does not provide one.
pub const DEFAULT_STORAGE_KEY: &str = "todo-tasks";
/// Lifetime of a completion celebration marker.
pub const DEFAULT_CELEBRATION_TTL: Duration = Duration::from_millis(2000);

/// Runtime settings for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Slot key holding the serialized task list.
    pub storage_key: String,
    /// How long each celebration marker stays active.
    pub celebration_ttl: Duration,
    /// Category preselected in a fresh editor.
    pub default_category: TaskCategory,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            celebration_ttl: DEFAULT_CELEBRATION_TTL,
            default_category: TaskCategory::Normal,
        }
    }
}

impl TodoConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_celebration_ttl(mut self, ttl: Duration) -> Self {
        self.celebration_ttl = ttl;
        self
    }

    pub fn with_default_category(mut self, category: TaskCategory) -> Self {
        self.default_category = category;
        self
    }
}
