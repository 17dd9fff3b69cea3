//! Task store: the single owner of the to-do list.
//!
//! # Responsibility
//! - Load the list once from its slot, then mirror every mutation back.
//! - Emit toast notifications and celebration markers for list events.
//! - Serve derived counts without side effects.
//!
//! # Invariants
//! - Tasks are ordered newest first; ids are unique.
//! - Every successful mutation overwrites the slot with the full list.
//! - Storage failures are logged and absorbed; the in-memory list stays
//!   authoritative.
//! - Unknown ids and blank text are silent no-ops (no write, no toast).

use crate::config::TodoConfig;
use crate::model::task::{Task, TaskCategory, TaskId};
use crate::notify::{Notifier, TaskNotification};
use crate::presentation::celebration::CelebrationBoard;
use crate::presentation::summary::TaskSummary;
use crate::storage::{decode_tasks, encode_tasks, KeyValueStore};
use log::{debug, info, warn};
use std::time::Instant;

/// Result of toggling an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Completion state after the toggle.
    pub completed: bool,
    /// Marker spawned by a false→true transition.
    pub celebration: Option<String>,
}

/// In-memory task list mirrored into one key-value slot.
pub struct TaskStore<S: KeyValueStore, N: Notifier> {
    kv: S,
    notifier: N,
    storage_key: String,
    tasks: Vec<Task>,
    celebrations: CelebrationBoard,
}

impl<S: KeyValueStore, N: Notifier> TaskStore<S, N> {
    /// Builds a store from whatever the slot currently holds.
    ///
    /// A missing, unreadable or corrupt slot yields an empty list. Loading
    /// never writes back.
    pub fn load(kv: S, notifier: N, config: &TodoConfig) -> Self {
        let tasks = read_tasks(&kv, &config.storage_key);
        Self {
            kv,
            notifier,
            storage_key: config.storage_key.clone(),
            tasks,
            celebrations: CelebrationBoard::new(config.celebration_ttl),
        }
    }

    /// Prepends a new open task.
    ///
    /// Returns `None` without touching storage when `text` is blank.
    pub fn add(&mut self, text: &str, category: TaskCategory) -> Option<TaskId> {
        let task = match Task::new(text, category) {
            Ok(task) => task,
            Err(err) => {
                debug!("event=task_add module=store status=skipped reason={err}");
                return None;
            }
        };
        let id = task.id.clone();
        self.tasks.insert(0, task);
        self.persist("task_add");
        info!(
            "event=task_add module=store status=ok category={} total={}",
            category,
            self.tasks.len()
        );
        self.notify(TaskNotification::TaskAdded);
        Some(id)
    }

    /// Toggles completion using the current time for any celebration.
    pub fn toggle(&mut self, id: &str) -> Option<ToggleOutcome> {
        self.toggle_at(id, Instant::now())
    }

    /// Toggles completion; a false→true transition spawns a celebration
    /// marker anchored at `now` and emits a completion toast. Markers
    /// expired by `now` are dropped first.
    pub fn toggle_at(&mut self, id: &str, now: Instant) -> Option<ToggleOutcome> {
        self.celebrations.sweep(now);
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=store status=skipped reason=not_found");
            return None;
        };
        let completed = task.toggle();
        self.persist("task_toggle");

        let celebration = if completed {
            let marker = self.celebrations.spawn(now);
            self.notify(TaskNotification::TaskCompleted);
            Some(marker)
        } else {
            None
        };
        info!(
            "event=task_toggle module=store status=ok completed={completed} completed_count={}",
            self.completed_count()
        );
        Some(ToggleOutcome {
            completed,
            celebration,
        })
    }

    /// Removes a task and returns it; `None` when the id is unknown.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=task_remove module=store status=skipped reason=not_found");
            return None;
        };
        let removed = self.tasks.remove(index);
        self.persist("task_remove");
        info!(
            "event=task_remove module=store status=ok total={}",
            self.tasks.len()
        );
        self.notify(TaskNotification::TaskRemoved);
        Some(removed)
    }

    /// Tasks in display order, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    /// True only for a non-empty list with every task completed.
    pub fn all_complete(&self) -> bool {
        self.summary().all_complete
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::from_tasks(&self.tasks)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn celebrations(&self) -> &CelebrationBoard {
        &self.celebrations
    }

    /// Marker ids still live at `now`.
    pub fn active_celebrations(&self, now: Instant) -> Vec<String> {
        self.celebrations.active(now)
    }

    /// Drops markers that expired by `now`.
    pub fn sweep_celebrations(&mut self, now: Instant) -> usize {
        self.celebrations.sweep(now)
    }

    fn persist(&self, event: &'static str) {
        let raw = match encode_tasks(&self.tasks) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event={event} module=store status=error error_code=encode_failed error={err}"
                );
                return;
            }
        };
        if let Err(err) = self.kv.set(&self.storage_key, &raw) {
            warn!("event={event} module=store status=error error_code=persist_failed error={err}");
        }
    }

    fn notify(&self, notification: TaskNotification) {
        self.notifier.notify(&notification.toast());
    }
}

fn read_tasks(kv: &impl KeyValueStore, key: &str) -> Vec<Task> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=tasks_load module=store status=ok source=empty");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=tasks_load module=store status=error error_code=read_failed error={err}");
            return Vec::new();
        }
    };

    match decode_tasks(&raw) {
        Ok(tasks) => {
            info!(
                "event=tasks_load module=store status=ok source=slot total={}",
                tasks.len()
            );
            tasks
        }
        Err(err) => {
            warn!(
                "event=tasks_load module=store status=error error_code=decode_failed error={err}"
            );
            Vec::new()
        }
    }
}
