//! Core logic for the Sparkle to-do widget.
//! This crate is the single source of truth for list invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod presentation;
pub mod service;
pub mod storage;
pub mod widget;

pub use config::{TodoConfig, DEFAULT_CELEBRATION_TTL, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskCategory, TaskId, TaskValidationError};
pub use notify::{LogNotifier, NoopNotifier, Notifier, TaskNotification, Toast, ToastQueue};
pub use presentation::celebration::{CelebrationBoard, CelebrationMarker};
pub use presentation::summary::TaskSummary;
pub use service::task_editor::{EditorKey, TaskEditor};
pub use service::task_store::{TaskStore, ToggleOutcome};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
    TaskCodecError,
};
pub use widget::{TodoWidget, WidgetSnapshot};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
