//! Board and task domain model.
//!
//! # Responsibility
//! - Define the canonical board/task records shared by store and adapters.
//! - Pin the persisted wire shape of both records (implicit schema v1).
//!
//! # Invariants
//! - `id` fields are stable and never reused for another board/task.
//! - A task is owned by exactly one board; ownership changes only through
//!   the store's move operation.
//! - Board and task titles are non-empty after trimming.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a board.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BoardId = Uuid;

/// Stable identifier for a task within its owning board.
pub type TaskId = Uuid;

/// Validation failure for board/task field constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Board title is empty after trimming.
    EmptyBoardTitle,
    /// Task title is empty after trimming.
    EmptyTaskTitle,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBoardTitle => write!(f, "board title must not be blank"),
            Self::EmptyTaskTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for ValidationError {}

/// A single work item owned by one board.
///
/// `description` and `due_date` are optional in the persisted blob; absent
/// fields decode as empty strings so v1 blobs written before either field
/// existed still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable ID, generated at creation, immutable.
    pub id: TaskId,
    /// Display title. Non-empty after trimming.
    pub title: String,
    /// Free-form body text. Empty when the user provided none.
    #[serde(default)]
    pub description: String,
    /// Date string as entered in the UI. Empty when unset.
    #[serde(default, rename = "dueDate")]
    pub due_date: String,
}

impl Task {
    /// Creates a task with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            due_date: due_date.into(),
        }
    }

    /// Checks title constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTaskTitle);
        }
        Ok(())
    }
}

/// A named workflow column holding an ordered task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Stable ID, generated at creation, immutable.
    pub id: BoardId,
    /// Display title, immutable after creation (no rename operation).
    pub title: String,
    /// Tasks in insertion order; insertion order is display order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    /// Creates an empty board with a generated stable ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    /// Checks title constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyBoardTitle);
        }
        Ok(())
    }

    /// Returns the task with the given ID, if present on this board.
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Returns the position of the task with the given ID.
    pub fn task_index(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }
}
