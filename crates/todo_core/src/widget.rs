//! Widget facade combining store, editor and presentation state.
//!
//! # Responsibility
//! - Give UI shells one object to drive and one snapshot to render.
//!
//! # Invariants
//! - Snapshots are copies; mutating them never reaches the store.

use crate::config::TodoConfig;
use crate::model::task::{Task, TaskCategory, TaskId};
use crate::notify::Notifier;
use crate::presentation::summary::TaskSummary;
use crate::service::task_editor::{EditorKey, TaskEditor};
use crate::service::task_store::{TaskStore, ToggleOutcome};
use crate::storage::KeyValueStore;
use std::time::Instant;

/// Render-ready copy of widget state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub tasks: Vec<Task>,
    pub draft: String,
    pub category: TaskCategory,
    pub summary: TaskSummary,
    /// Celebration marker ids live at snapshot time.
    pub celebrations: Vec<String>,
}

/// One to-do widget instance.
pub struct TodoWidget<S: KeyValueStore, N: Notifier> {
    store: TaskStore<S, N>,
    editor: TaskEditor,
}

impl<S: KeyValueStore, N: Notifier> TodoWidget<S, N> {
    /// Loads persisted tasks and prepares a fresh editor.
    pub fn load(kv: S, notifier: N, config: &TodoConfig) -> Self {
        Self {
            store: TaskStore::load(kv, notifier, config),
            editor: TaskEditor::new(config.default_category),
        }
    }

    pub fn store(&self) -> &TaskStore<S, N> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore<S, N> {
        &mut self.store
    }

    pub fn editor(&self) -> &TaskEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut TaskEditor {
        &mut self.editor
    }

    pub fn submit(&mut self) -> Option<TaskId> {
        self.editor.submit(&mut self.store)
    }

    pub fn handle_key(&mut self, key: EditorKey) -> Option<TaskId> {
        self.editor.handle_key(key, &mut self.store)
    }

    pub fn toggle_at(&mut self, id: &str, now: Instant) -> Option<ToggleOutcome> {
        self.store.toggle_at(id, now)
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        self.store.remove(id)
    }

    pub fn sweep_celebrations(&mut self, now: Instant) -> usize {
        self.store.sweep_celebrations(now)
    }

    pub fn snapshot(&self, now: Instant) -> WidgetSnapshot {
        WidgetSnapshot {
            tasks: self.store.tasks().to_vec(),
            draft: self.editor.draft().to_string(),
            category: self.editor.category(),
            summary: self.store.summary(),
            celebrations: self.store.active_celebrations(now),
        }
    }
}
