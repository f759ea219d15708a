//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasklane_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use tasklane_core::db::open_db_in_memory;
use tasklane_core::{BoardStore, SqliteSlotRepository, TaskDraft};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from the Flutter/FFI runtime setup.
    println!("tasklane_core version={}", tasklane_core::core_version());

    let conn = open_db_in_memory()?;
    let mut store = BoardStore::open(SqliteSlotRepository::new(&conn))?;
    let board_id = store.add_board("Smoke")?;
    store.add_task(
        board_id,
        &TaskDraft {
            title: "probe".to_string(),
            ..TaskDraft::default()
        },
    )?;

    for board in store.boards() {
        println!("board title={} tasks={}", board.title, board.tasks.len());
    }

    Ok(())
}
