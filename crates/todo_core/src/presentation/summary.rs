//! Completion counts derived from the current list.

use crate::model::task::Task;

/// Footer figures for the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    pub completed: usize,
    pub total: usize,
    /// `total > 0 && completed == total`.
    pub all_complete: bool,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        let total = tasks.len();
        Self {
            completed,
            total,
            all_complete: total > 0 && completed == total,
        }
    }
}
