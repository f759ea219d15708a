//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level board operations to Dart via FRB.
//! - Keep error semantics simple for the UI shell.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every mutation call is followed by the shell re-reading
//!   `boards_snapshot` to rebuild its view.

use std::path::PathBuf;
use std::sync::OnceLock;
use tasklane_core::db::open_db;
use tasklane_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, BoardStore, Mutation,
    SqliteSlotRepository, TaskDraft,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "tasklane.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same configuration (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task fields for render and edit-form hydration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
}

/// Board with its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub board_id: String,
    pub title: String,
    pub tasks: Vec<TaskView>,
}

/// Full render model; the shell rebuilds its view from this after every
/// mutation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardsSnapshot {
    /// Boards in display order (empty on failure).
    pub boards: Vec<BoardView>,
    /// Whether the snapshot was read successfully.
    pub ok: bool,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for board/task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation applied.
    pub ok: bool,
    /// Created board/task ID, when the operation creates one.
    pub created_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn applied(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            created_id: None,
            message: message.into(),
        }
    }

    fn created(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            created_id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            created_id: None,
            message: message.into(),
        }
    }
}

/// Reads the full board list for rendering.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures produce an empty snapshot with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn boards_snapshot() -> BoardsSnapshot {
    match with_store(|store| Ok(store.boards().iter().map(to_board_view).collect())) {
        Ok(boards) => BoardsSnapshot {
            boards,
            ok: true,
            message: String::new(),
        },
        Err(err) => BoardsSnapshot {
            boards: Vec::new(),
            ok: false,
            message: format!("boards_snapshot failed: {err}"),
        },
    }
}

/// Creates a new empty board.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created board ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add(title: String) -> ActionResponse {
    match with_store(|store| store.add_board(&title).map_err(|err| err.to_string())) {
        Ok(board_id) => ActionResponse::created("Board created.", board_id.to_string()),
        Err(err) => ActionResponse::failure(format!("board_add failed: {err}")),
    }
}

/// Deletes a board and all of its tasks.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - A stale board ID yields `ok=false` with no state change.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete(board_id: String) -> ActionResponse {
    let outcome = parse_id(&board_id, "board_id").and_then(|board_id| {
        with_store(|store| store.delete_board(board_id).map_err(|err| err.to_string()))
    });
    match outcome {
        Ok(outcome) => mutation_response(outcome, "Board deleted."),
        Err(err) => ActionResponse::failure(format!("board_delete failed: {err}")),
    }
}

/// Adds a task to a board.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created task ID on success; a stale board ID yields
///   `ok=false` with no state change.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    board_id: String,
    title: String,
    description: String,
    due_date: String,
) -> ActionResponse {
    let draft = TaskDraft {
        title,
        description,
        due_date,
    };
    let created = parse_id(&board_id, "board_id").and_then(|board_id| {
        with_store(|store| store.add_task(board_id, &draft).map_err(|err| err.to_string()))
    });
    match created {
        Ok(Some(task_id)) => ActionResponse::created("Task created.", task_id.to_string()),
        Ok(None) => ActionResponse::failure("Board not found."),
        Err(err) => ActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Overwrites title, description, and due date of one task.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Stale board/task IDs yield `ok=false` with no state change.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(
    board_id: String,
    task_id: String,
    title: String,
    description: String,
    due_date: String,
) -> ActionResponse {
    let draft = TaskDraft {
        title,
        description,
        due_date,
    };
    let outcome = parse_id(&board_id, "board_id").and_then(|board_id| {
        let task_id = parse_id(&task_id, "task_id")?;
        with_store(|store| {
            store
                .update_task(board_id, task_id, &draft)
                .map_err(|err| err.to_string())
        })
    });
    match outcome {
        Ok(outcome) => mutation_response(outcome, "Task updated."),
        Err(err) => ActionResponse::failure(format!("task_update failed: {err}")),
    }
}

/// Deletes one task from a board.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Stale board/task IDs yield `ok=false` with no state change.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(board_id: String, task_id: String) -> ActionResponse {
    let outcome = parse_id(&board_id, "board_id").and_then(|board_id| {
        let task_id = parse_id(&task_id, "task_id")?;
        with_store(|store| {
            store
                .delete_task(board_id, task_id)
                .map_err(|err| err.to_string())
        })
    });
    match outcome {
        Ok(outcome) => mutation_response(outcome, "Task deleted."),
        Err(err) => ActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Moves one task from a source board to the end of a destination board.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Stale IDs yield `ok=false` with no state change.
#[flutter_rust_bridge::frb(sync)]
pub fn task_move(task_id: String, from_board_id: String, to_board_id: String) -> ActionResponse {
    let outcome = parse_id(&task_id, "task_id").and_then(|task_id| {
        let from_board_id = parse_id(&from_board_id, "from_board_id")?;
        let to_board_id = parse_id(&to_board_id, "to_board_id")?;
        with_store(|store| {
            store
                .move_task(task_id, from_board_id, to_board_id)
                .map_err(|err| err.to_string())
        })
    });
    match outcome {
        Ok(outcome) => mutation_response(outcome, "Task moved."),
        Err(err) => ActionResponse::failure(format!("task_move failed: {err}")),
    }
}

fn mutation_response(outcome: Mutation, applied_message: &str) -> ActionResponse {
    match outcome {
        Mutation::Applied => ActionResponse::applied(applied_message),
        Mutation::MissingBoard => ActionResponse::failure("Board not found."),
        Mutation::MissingTask => ActionResponse::failure("Task not found."),
    }
}

fn parse_id(value: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid {field}: `{value}`"))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TASKLANE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(
    f: impl FnOnce(&mut BoardStore<SqliteSlotRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("board DB open failed: {err}"))?;
    let repo = SqliteSlotRepository::new(&conn);
    let mut store =
        BoardStore::open(repo).map_err(|err| format!("board store open failed: {err}"))?;
    f(&mut store)
}

fn to_board_view(board: &tasklane_core::Board) -> BoardView {
    BoardView {
        board_id: board.id.to_string(),
        title: board.title.clone(),
        tasks: board
            .tasks
            .iter()
            .map(|task| TaskView {
                task_id: task.id.to_string(),
                title: task.title.clone(),
                description: task.description.clone(),
                due_date: task.due_date.clone(),
            })
            .collect(),
    }
}
