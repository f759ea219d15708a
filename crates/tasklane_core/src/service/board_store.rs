//! Board store use-case service.
//!
//! # Responsibility
//! - Own the in-memory board list and expose CRUD + move operations.
//! - Keep the persisted slot synchronized after every applied mutation.
//!
//! # Invariants
//! - Task IDs are unique within their owning board.
//! - Every task belongs to exactly one board; move removes from the
//!   source and appends to the destination in one operation.
//! - Missing boards/tasks never mutate state and never panic.

use crate::model::board::{Board, BoardId, Task, TaskId, ValidationError};
use crate::repo::slot_repo::{RepoError, SlotRepository};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key holding the serialized board list.
pub const BOARDS_SLOT_KEY: &str = "kanban-boards";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure modes for store operations.
///
/// A missing board or task is not a failure; see [`Mutation`].
#[derive(Debug)]
pub enum StoreError {
    /// Input failed title constraints; nothing was persisted.
    Validation(ValidationError),
    /// Board list could not be serialized for the slot write.
    Serialize(serde_json::Error),
    /// Storage transport failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize board list: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of a mutation addressing boards/tasks by ID.
///
/// IDs arriving from the UI can be stale, so a missing target is reported
/// as an outcome rather than an error; `Missing*` guarantees no state
/// change. Callers may ignore the value the way the UI ignores a stale
/// drag, or surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Mutation {
    /// The operation's postcondition holds.
    Applied,
    /// The referenced board does not exist; state is unchanged.
    MissingBoard,
    /// The board exists but the referenced task does not; state is unchanged.
    MissingTask,
}

impl Mutation {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Caller-supplied task fields for add/update operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Display title. Must be non-empty after trimming.
    pub title: String,
    /// Free-form body text; empty when the user provided none.
    pub description: String,
    /// Date string as entered in the UI; empty when unset.
    pub due_date: String,
}

/// The board store: in-memory board list backed by one persisted slot.
///
/// Every applied mutation persists the full board list and bumps the
/// revision counter; the rendering collaborator re-reads [`Self::boards`]
/// whenever it observes a new revision.
pub struct BoardStore<R: SlotRepository> {
    repo: R,
    boards: Vec<Board>,
    revision: u64,
}

impl<R: SlotRepository> BoardStore<R> {
    /// Creates a store over the given repository and performs the startup load.
    pub fn open(repo: R) -> StoreResult<Self> {
        let mut store = Self {
            repo,
            boards: Vec::new(),
            revision: 0,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the persisted slot into memory.
    ///
    /// An absent slot is the normal empty state and leaves the current
    /// list untouched. A malformed slot value is logged and likewise
    /// leaves the current list untouched; only transport errors propagate.
    pub fn reload(&mut self) -> StoreResult<()> {
        let Some(blob) = self.repo.read_slot(BOARDS_SLOT_KEY)? else {
            return Ok(());
        };

        match serde_json::from_str::<Vec<Board>>(&blob) {
            Ok(boards) => {
                self.boards = boards;
                self.revision += 1;
            }
            Err(err) => {
                warn!("event=slot_load module=store status=malformed key={BOARDS_SLOT_KEY} error={err}");
            }
        }

        Ok(())
    }

    /// Boards in display order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Monotonic change counter; a new value signals the need to re-render.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the board with the given ID, if present.
    pub fn find_board(&self, board_id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| board.id == board_id)
    }

    /// Returns one task by board and task ID; used to hydrate the edit form.
    pub fn find_task(&self, board_id: BoardId, task_id: TaskId) -> Option<&Task> {
        self.find_board(board_id)?.task(task_id)
    }

    /// Appends a new empty board with the given title.
    pub fn add_board(&mut self, title: &str) -> StoreResult<BoardId> {
        let board = Board::new(title.trim());
        board.validate()?;

        let board_id = board.id;
        self.boards.push(board);
        self.persist()?;
        self.revision += 1;
        Ok(board_id)
    }

    /// Removes the board with the given ID and all of its tasks.
    ///
    /// A missing board leaves state unchanged; the slot is still written
    /// (a no-op overwrite), matching the remove-then-save shape callers
    /// have always observed.
    pub fn delete_board(&mut self, board_id: BoardId) -> StoreResult<Mutation> {
        let before = self.boards.len();
        self.boards.retain(|board| board.id != board_id);
        let removed = self.boards.len() != before;

        self.persist()?;
        if removed {
            self.revision += 1;
            Ok(Mutation::Applied)
        } else {
            Ok(Mutation::MissingBoard)
        }
    }

    /// Appends a new task built from the draft to the given board.
    ///
    /// Returns `Ok(None)` when the board does not exist.
    pub fn add_task(&mut self, board_id: BoardId, draft: &TaskDraft) -> StoreResult<Option<TaskId>> {
        let task = Task::new(
            draft.title.trim(),
            draft.description.trim(),
            draft.due_date.trim(),
        );
        task.validate()?;

        let Some(board) = self.boards.iter_mut().find(|board| board.id == board_id) else {
            return Ok(None);
        };

        let task_id = task.id;
        board.tasks.push(task);
        self.persist()?;
        self.revision += 1;
        Ok(Some(task_id))
    }

    /// Overwrites title, description, and due date of one task in place.
    ///
    /// Task ID and owning board are immutable in this operation.
    pub fn update_task(
        &mut self,
        board_id: BoardId,
        task_id: TaskId,
        draft: &TaskDraft,
    ) -> StoreResult<Mutation> {
        if draft.title.trim().is_empty() {
            return Err(ValidationError::EmptyTaskTitle.into());
        }

        let Some(board) = self.boards.iter_mut().find(|board| board.id == board_id) else {
            return Ok(Mutation::MissingBoard);
        };
        let Some(task) = board.tasks.iter_mut().find(|task| task.id == task_id) else {
            return Ok(Mutation::MissingTask);
        };

        task.title = draft.title.trim().to_string();
        task.description = draft.description.trim().to_string();
        task.due_date = draft.due_date.trim().to_string();

        self.persist()?;
        self.revision += 1;
        Ok(Mutation::Applied)
    }

    /// Removes one task from the given board.
    ///
    /// When the board exists but the task does not, state is unchanged and
    /// the slot is still written (a no-op overwrite).
    pub fn delete_task(&mut self, board_id: BoardId, task_id: TaskId) -> StoreResult<Mutation> {
        let Some(board) = self.boards.iter_mut().find(|board| board.id == board_id) else {
            return Ok(Mutation::MissingBoard);
        };

        let before = board.tasks.len();
        board.tasks.retain(|task| task.id != task_id);
        let removed = board.tasks.len() != before;

        self.persist()?;
        if removed {
            self.revision += 1;
            Ok(Mutation::Applied)
        } else {
            Ok(Mutation::MissingTask)
        }
    }

    /// Moves one task from the source board to the end of the destination.
    ///
    /// The task loses its relative position; drop position is not part of
    /// the operation. Missing boards or a task absent from the source
    /// leave state unchanged. Moving onto the source board itself is
    /// reported as applied without touching anything: the task already
    /// sits on the destination exactly once.
    pub fn move_task(
        &mut self,
        task_id: TaskId,
        from_board_id: BoardId,
        to_board_id: BoardId,
    ) -> StoreResult<Mutation> {
        let Some(from_index) = self.board_index(from_board_id) else {
            return Ok(Mutation::MissingBoard);
        };
        let Some(to_index) = self.board_index(to_board_id) else {
            return Ok(Mutation::MissingBoard);
        };
        let Some(task_index) = self.boards[from_index].task_index(task_id) else {
            return Ok(Mutation::MissingTask);
        };

        if from_index == to_index {
            return Ok(Mutation::Applied);
        }

        let task = self.boards[from_index].tasks.remove(task_index);
        self.boards[to_index].tasks.push(task);

        self.persist()?;
        self.revision += 1;
        Ok(Mutation::Applied)
    }

    fn board_index(&self, board_id: BoardId) -> Option<usize> {
        self.boards.iter().position(|board| board.id == board_id)
    }

    /// Serializes the full board list and overwrites the slot.
    fn persist(&self) -> StoreResult<()> {
        let blob = serde_json::to_string(&self.boards).map_err(StoreError::Serialize)?;
        self.repo.write_slot(BOARDS_SLOT_KEY, &blob)?;
        Ok(())
    }
}
