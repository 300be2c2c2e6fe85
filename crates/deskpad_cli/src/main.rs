//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `deskpad_core` linkage.
//! - Exercise one add/edit/complete round against an in-memory store.

use deskpad_core::db::open_db_in_memory;
use deskpad_core::{SqliteStateStore, TaskService};

fn main() {
    println!("deskpad_core version={}", deskpad_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("state database unavailable: {err}");
            std::process::exit(1);
        }
    };

    let result = SqliteStateStore::try_new(&conn)
        .map_err(deskpad_core::ServiceError::Repo)
        .and_then(|store| {
            let mut tasks = TaskService::open(store)?;
            let id = tasks.add_task()?;
            tasks.commit_edit(id, "probe the task list")?;
            tasks.set_completed(id, true)?;
            Ok((tasks.active_tasks().len(), tasks.completed_tasks().len()))
        });

    match result {
        Ok((active, completed)) => {
            println!("smoke round ok active={active} completed={completed}");
        }
        Err(err) => {
            eprintln!("smoke round failed: {err}");
            std::process::exit(1);
        }
    }
}
