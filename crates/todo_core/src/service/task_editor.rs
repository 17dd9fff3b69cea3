//! Task editor: draft text plus the selected category.
//!
//! # Invariants
//! - The draft is cleared only after a successful submit.
//! - The selected category survives submissions.

use crate::model::task::{TaskCategory, TaskId};
use crate::notify::Notifier;
use crate::service::task_store::TaskStore;
use crate::storage::KeyValueStore;

/// Single key gestures understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Confirms the draft.
    Enter,
    /// Deletes the last character of the draft.
    Backspace,
    /// Appends one character to the draft.
    Char(char),
}

/// Pending input for the next task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEditor {
    draft: String,
    category: TaskCategory,
}

impl TaskEditor {
    pub fn new(category: TaskCategory) -> Self {
        Self {
            draft: String::new(),
            category,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn category(&self) -> TaskCategory {
        self.category
    }

    pub fn select_category(&mut self, category: TaskCategory) {
        self.category = category;
    }

    /// Adds the draft to `store`; clears the draft when a task was created.
    pub fn submit<S: KeyValueStore, N: Notifier>(
        &mut self,
        store: &mut TaskStore<S, N>,
    ) -> Option<TaskId> {
        let id = store.add(&self.draft, self.category)?;
        self.draft.clear();
        Some(id)
    }

    /// Applies one key; `Enter` submits and returns the created id.
    pub fn handle_key<S: KeyValueStore, N: Notifier>(
        &mut self,
        key: EditorKey,
        store: &mut TaskStore<S, N>,
    ) -> Option<TaskId> {
        match key {
            EditorKey::Enter => self.submit(store),
            EditorKey::Backspace => {
                self.draft.pop();
                None
            }
            EditorKey::Char(ch) => {
                self.draft.push(ch);
                None
            }
        }
    }
}
