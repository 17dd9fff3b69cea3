//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one process-wide widget session to Dart via FRB.
//! - Convert core types into flat, string-keyed DTOs.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - All widget access is serialized through one mutex.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Instant;
use todo_core::db::open_db;
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EditorKey, SqliteKeyValueStore, Task, TaskCategory, TodoConfig, TodoWidget, ToastQueue,
    WidgetSnapshot,
};

const DEFAULT_DB_FILE_NAME: &str = "todo_widget.sqlite3";
const DB_PATH_ENV: &str = "TODO_DB_PATH";

type Session = TodoWidget<SqliteKeyValueStore, ToastQueue>;

static SESSION: OnceLock<Mutex<Option<Session>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One task row for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// `priority|normal|fun`.
    pub category: String,
}

/// Full widget state for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSnapshot {
    pub items: Vec<TodoItem>,
    pub draft: String,
    pub category: String,
    pub completed_count: u32,
    pub total_count: u32,
    pub all_complete: bool,
    /// Active celebration marker ids.
    pub hearts: Vec<String>,
}

/// Toast payload for the Dart presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoToast {
    pub kind: String,
    pub title: String,
    pub description: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// Whether the call reached the session.
    pub ok: bool,
    /// Whether the call changed the task list.
    pub changed: bool,
    /// Task id created or affected, when any.
    pub task_id: Option<String>,
    pub message: String,
    pub snapshot: Option<TodoSnapshot>,
}

impl TodoActionResponse {
    fn applied(
        changed: bool,
        task_id: Option<String>,
        message: impl Into<String>,
        snapshot: TodoSnapshot,
    ) -> Self {
        Self {
            ok: true,
            changed,
            task_id,
            message: message.into(),
            snapshot: Some(snapshot),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            task_id: None,
            message: message.into(),
            snapshot: None,
        }
    }
}

/// Opens (or reopens) the widget session on `db_path`.
///
/// `None` or blank uses `TODO_DB_PATH`, falling back to the temp directory.
/// Any previous session is dropped, discarding its celebrations and toasts.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_open(db_path: Option<String>) -> TodoActionResponse {
    let path = resolve_db_path(db_path);
    let conn = match open_db(&path) {
        Ok(conn) => conn,
        Err(err) => return TodoActionResponse::failure(format!("todo_open failed: {err}")),
    };
    let widget = TodoWidget::load(
        SqliteKeyValueStore::new(conn),
        ToastQueue::new(),
        &TodoConfig::default(),
    );

    let mut guard = match lock_session() {
        Ok(guard) => guard,
        Err(message) => return TodoActionResponse::failure(message),
    };
    let snapshot = to_snapshot(widget.snapshot(Instant::now()));
    *guard = Some(widget);
    TodoActionResponse::applied(false, None, "Session opened.", snapshot)
}

/// Returns the current state.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_snapshot() -> TodoActionResponse {
    with_session("todo_snapshot", |_, _| (false, None, "Snapshot.".to_string()))
}

/// Replaces the editor draft.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_set_draft(text: String) -> TodoActionResponse {
    with_session("todo_set_draft", |widget, _| {
        widget.editor_mut().set_draft(text);
        (false, None, "Draft updated.".to_string())
    })
}

/// Selects the category for upcoming tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_select_category(category: String) -> TodoActionResponse {
    let Some(parsed) = TaskCategory::parse(&category) else {
        return TodoActionResponse::failure(format!(
            "todo_select_category failed: unknown category `{}`",
            category.trim()
        ));
    };
    with_session("todo_select_category", |widget, _| {
        widget.editor_mut().select_category(parsed);
        (false, None, format!("Category set to {parsed}."))
    })
}

/// Submits the editor draft.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_submit() -> TodoActionResponse {
    with_session("todo_submit", |widget, _| created(widget.submit()))
}

/// Enter-key confirmation gesture; same effect as `todo_submit`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_key_enter() -> TodoActionResponse {
    with_session("todo_key_enter", |widget, _| {
        created(widget.handle_key(EditorKey::Enter))
    })
}

/// Toggles completion of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(task_id: String) -> TodoActionResponse {
    with_session("todo_toggle", |widget, now| {
        match widget.toggle_at(&task_id, now) {
            Some(outcome) if outcome.completed => {
                (true, Some(task_id.clone()), "Task completed.".to_string())
            }
            Some(_) => (true, Some(task_id.clone()), "Task reopened.".to_string()),
            None => (false, None, "No such task.".to_string()),
        }
    })
}

/// Removes one task.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_remove(task_id: String) -> TodoActionResponse {
    with_session("todo_remove", |widget, _| match widget.remove(&task_id) {
        Some(removed) => (true, Some(removed.id), "Task removed.".to_string()),
        None => (false, None, "No such task.".to_string()),
    })
}

/// Takes queued toasts, oldest first. Empty when no session is open.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_drain_toasts() -> Vec<TodoToast> {
    let Ok(guard) = lock_session() else {
        return Vec::new();
    };
    let Some(widget) = guard.as_ref() else {
        return Vec::new();
    };
    widget
        .store()
        .notifier()
        .drain()
        .into_iter()
        .map(|toast| TodoToast {
            kind: toast.event.as_str().to_string(),
            title: toast.title,
            description: toast.description,
        })
        .collect()
}

fn created(task_id: Option<String>) -> (bool, Option<String>, String) {
    match task_id {
        Some(id) => (true, Some(id), "Task added.".to_string()),
        None => (false, None, "Nothing to add.".to_string()),
    }
}

fn with_session(
    op: &str,
    f: impl FnOnce(&mut Session, Instant) -> (bool, Option<String>, String),
) -> TodoActionResponse {
    let mut guard = match lock_session() {
        Ok(guard) => guard,
        Err(message) => return TodoActionResponse::failure(format!("{op} failed: {message}")),
    };
    let Some(widget) = guard.as_mut() else {
        return TodoActionResponse::failure(format!("{op} failed: session not opened"));
    };
    let now = Instant::now();
    let (changed, task_id, message) = f(widget, now);
    widget.sweep_celebrations(now);
    let snapshot = to_snapshot(widget.snapshot(now));
    TodoActionResponse::applied(changed, task_id, message, snapshot)
}

fn lock_session() -> Result<MutexGuard<'static, Option<Session>>, String> {
    SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .map_err(|_| {
            warn!("event=session_lock module=ffi status=error error_code=poisoned");
            "session lock poisoned".to_string()
        })
}

fn resolve_db_path(db_path: Option<String>) -> PathBuf {
    let explicit = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty());
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

fn to_snapshot(snapshot: WidgetSnapshot) -> TodoSnapshot {
    TodoSnapshot {
        items: snapshot.tasks.into_iter().map(to_item).collect(),
        draft: snapshot.draft,
        category: snapshot.category.as_str().to_string(),
        completed_count: count_u32(snapshot.summary.completed),
        total_count: count_u32(snapshot.summary.total),
        all_complete: snapshot.summary.all_complete,
        hearts: snapshot.celebrations,
    }
}

fn to_item(task: Task) -> TodoItem {
    TodoItem {
        id: task.id,
        text: task.text,
        completed: task.completed,
        category: task.category.as_str().to_string(),
    }
}

fn count_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, todo_drain_toasts, todo_key_enter, todo_open,
        todo_remove, todo_select_category, todo_set_draft, todo_snapshot, todo_submit,
        todo_toggle,
    };
    use std::sync::Mutex;

    // Tests share the process-wide session.
    static SESSION_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn session_flow_adds_completes_and_removes() {
        let _lock = SESSION_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow.sqlite3");
        let opened = todo_open(Some(path.to_string_lossy().into_owned()));
        assert!(opened.ok, "{}", opened.message);
        todo_drain_toasts();

        assert!(todo_select_category("Priority".to_string()).ok);
        todo_set_draft("Buy milk".to_string());
        let added = todo_key_enter();
        assert!(added.changed);
        let id = added.task_id.clone().expect("created id");
        let snapshot = added.snapshot.expect("snapshot");
        assert_eq!(snapshot.draft, "");
        assert_eq!(snapshot.category, "priority");
        assert_eq!(snapshot.items[0].category, "priority");

        let toggled = todo_toggle(id.clone());
        let snapshot = toggled.snapshot.expect("snapshot");
        assert!(snapshot.all_complete);
        assert_eq!(snapshot.hearts.len(), 1);
        assert_eq!((snapshot.completed_count, snapshot.total_count), (1, 1));

        assert!(todo_remove(id.clone()).changed);
        assert!(!todo_remove(id).changed);

        let kinds: Vec<String> = todo_drain_toasts().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec!["task_added", "task_completed", "task_removed"]);
    }

    #[test]
    fn session_reload_restores_tasks_and_rejects_bad_input() {
        let _lock = SESSION_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reload.sqlite3").to_string_lossy().into_owned();

        assert!(todo_open(Some(path.clone())).ok);
        todo_set_draft("   ".to_string());
        assert!(!todo_submit().changed);
        assert!(!todo_select_category("urgent".to_string()).ok);
        todo_set_draft("stay".to_string());
        assert!(todo_submit().changed);

        let reopened = todo_open(Some(path));
        assert_eq!(reopened.snapshot.expect("snapshot").total_count, 1);
        assert_eq!(
            todo_snapshot().snapshot.expect("snapshot").items[0].text,
            "stay"
        );
    }
}
