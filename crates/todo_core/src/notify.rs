//! Notification events and sinks.
//!
//! # Responsibility
//! - Map store events to toast copy.
//! - Hand toasts to a presenter without waiting on it.
//!
//! # Invariants
//! - Notifiers never fail the calling operation.

use log::info;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Store events that produce a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskNotification {
    TaskAdded,
    TaskCompleted,
    TaskRemoved,
}

impl TaskNotification {
    /// Stable event name for logs and FFI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaskAdded => "task_added",
            Self::TaskCompleted => "task_completed",
            Self::TaskRemoved => "task_removed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::TaskAdded => "✨ Task added!",
            Self::TaskCompleted => "🎉 Completed!",
            Self::TaskRemoved => "🗑️ Task removed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::TaskAdded => "You're doing amazing!",
            Self::TaskCompleted => "You're such a star! Keep going!",
            Self::TaskRemoved => "All clean!",
        }
    }

    pub fn toast(self) -> Toast {
        Toast {
            event: self,
            title: self.title().to_string(),
            description: self.description().to_string(),
        }
    }
}

/// Payload handed to the toast presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub event: TaskNotification,
    pub title: String,
    pub description: String,
}

/// Fire-and-forget toast presenter.
pub trait Notifier {
    fn notify(&self, toast: &Toast);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, toast: &Toast) {
        (**self).notify(toast)
    }
}

/// Drops every toast.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _toast: &Toast) {}
}

/// Writes toasts to the log instead of showing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: &Toast) {
        info!(
            "event=toast module=notify status=ok kind={}",
            toast.event.as_str()
        );
    }
}

/// Buffers toasts until a UI shell drains them.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: RefCell<VecDeque<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns queued toasts, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.pending.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: &Toast) {
        self.pending.borrow_mut().push_back(toast.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{Notifier, TaskNotification, ToastQueue};

    #[test]
    fn toast_copy_matches_event() {
        let toast = TaskNotification::TaskRemoved.toast();
        assert_eq!(toast.title, "🗑️ Task removed");
        assert_eq!(toast.description, "All clean!");
    }

    #[test]
    fn queue_drains_in_fifo_order() {
        let queue = ToastQueue::new();
        queue.notify(&TaskNotification::TaskAdded.toast());
        queue.notify(&TaskNotification::TaskCompleted.toast());

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].event, TaskNotification::TaskAdded);
        assert_eq!(drained[1].event, TaskNotification::TaskCompleted);
        assert!(queue.is_empty());
    }
}
