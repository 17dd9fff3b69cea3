//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todo_core` linkage without the Flutter shell.
//! - Keep output deterministic for quick local sanity checks.

use std::time::Instant;
use todo_core::db::open_db_in_memory;
use todo_core::{LogNotifier, SqliteKeyValueStore, TodoConfig, TodoWidget};

fn main() {
    println!("todo_core ping={}", todo_core::ping());
    println!("todo_core version={}", todo_core::core_version());

    match open_db_in_memory() {
        Ok(conn) => {
            let widget = TodoWidget::load(
                SqliteKeyValueStore::new(conn),
                LogNotifier,
                &TodoConfig::default(),
            );
            let summary = widget.snapshot(Instant::now()).summary;
            println!(
                "todo_core store=ok completed={} total={}",
                summary.completed, summary.total
            );
        }
        Err(err) => {
            eprintln!("todo_core store=error error={err}");
            std::process::exit(1);
        }
    }
}
