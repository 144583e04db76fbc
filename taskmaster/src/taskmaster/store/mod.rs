//! Task persistence for the task manager.
//!
//! This module defines:
//! - The task data model: statuses, records, and per-member task lists
//! - The `TaskStore` trait, a key-value style contract over whole task lists
//! - Error types for persistence failures
//!
//! The contract is independent of the backing medium; the `file` submodule
//! provides the flat-file implementation used in production.

use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) mod file;

/// Errors that can occur while reading or writing a member's task list.
#[derive(Error, Debug)]
pub enum Error {
    /// The stored task list exists but cannot be deserialized
    #[error("Stored task list is corrupt: {0}")]
    CorruptStore(#[from] serde_json::Error),
    /// A task was addressed by a position outside the current list
    #[error("Task index {index} is out of range: the list has {len} task(s)")]
    IndexOutOfRange { index: usize, len: usize },
    /// The underlying directory or file operation failed
    #[error("Task store I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// A status code stored on disk that maps to no known task status.
#[derive(Error, Debug)]
#[error("Unknown task status code {0}")]
pub struct UnknownStatusCode(pub i8);

/// The lifecycle state of a single task.
///
/// Every task starts out `Added`; the command layer may later overwrite the
/// status with `Finished` or `Cancelled`. No transition table is enforced
/// here: any status may replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Cancelled,
    Added,
    Finished,
}

impl TaskStatus {
    /// The smallint wire code this status is persisted as.
    pub fn code(self) -> i8 {
        match self {
            TaskStatus::Cancelled => -1,
            TaskStatus::Added => 0,
            TaskStatus::Finished => 1,
        }
    }

    /// The emoji shown before the description when listing tasks.
    pub fn glyph(self) -> &'static str {
        match self {
            TaskStatus::Cancelled => "⛔",
            TaskStatus::Added => "🎯",
            TaskStatus::Finished => "✅",
        }
    }
}

impl TryFrom<i8> for TaskStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(TaskStatus::Cancelled),
            0 => Ok(TaskStatus::Added),
            1 => Ok(TaskStatus::Finished),
            unknown => Err(UnknownStatusCode(unknown)),
        }
    }
}

/// One entry in a member's task list.
///
/// The description is fixed at creation time; only the status changes over
/// the record's lifetime. Persisted as a `[code, description]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(i8, String)", into = "(i8, String)")]
pub struct TaskRecord {
    pub status: TaskStatus,
    pub description: String,
}

impl TaskRecord {
    /// Creates a freshly added task with the given description.
    pub fn added(description: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Added,
            description: description.into(),
        }
    }
}

impl From<TaskRecord> for (i8, String) {
    fn from(record: TaskRecord) -> Self {
        (record.status.code(), record.description)
    }
}

impl TryFrom<(i8, String)> for TaskRecord {
    type Error = UnknownStatusCode;

    fn try_from((code, description): (i8, String)) -> Result<Self, Self::Error> {
        Ok(Self {
            status: TaskStatus::try_from(code)?,
            description,
        })
    }
}

/// A member's tasks in insertion order.
///
/// A task's 1-based position in this sequence is its only identifier; there
/// is no separate task ID.
pub type TaskList = Vec<TaskRecord>;

/// The raw addressing pair for one member's task list.
///
/// Backends derive their actual storage location from this pair; the raw IDs
/// themselves are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreKey {
    pub guild_id: u64,
    pub user_id: u64,
}

/// The outcome of appending a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appended {
    /// The task list after the append
    pub tasks: TaskList,
    /// The 1-based position assigned to the new task
    pub index: usize,
    /// Whether the list had already reached the configured maximum before
    /// the append. The cap is advisory: the append happens regardless, and
    /// the caller decides whether to warn the member.
    pub at_capacity: bool,
}

/// Trait for persisting per-member task lists.
///
/// All operations are addressed by a [`StoreKey`] and work on the whole list:
/// load, modify, write back. There is no locking; the design assumes a single
/// in-flight command per member.
#[automock]
pub trait TaskStore {
    /// Creates the storage location for this key if it does not exist yet,
    /// starting the member off with an empty task list.
    fn ensure_initialized(&self, key: StoreKey) -> Result<(), Error>;

    /// Whether a task list has ever been persisted for this key.
    fn exists(&self, key: StoreKey) -> bool;

    /// Loads the task list for this key.
    ///
    /// A missing list is not an error: read-only commands use that case to
    /// short-circuit with a "no tasks" reply.
    fn load(&self, key: StoreKey) -> Result<TaskList, Error>;

    /// Appends a freshly added task and persists the result.
    fn append(&self, key: StoreKey, description: &str) -> Result<Appended, Error>;

    /// Overwrites the status of the task at the given 1-based position.
    ///
    /// Fails with [`Error::IndexOutOfRange`] when the position is not in
    /// `1..=len`, leaving the persisted list untouched.
    fn set_status(&self, key: StoreKey, index: usize, status: TaskStatus) -> Result<TaskList, Error>;

    /// Removes every task with the given status.
    ///
    /// When nothing is left afterwards the backing storage is deleted
    /// entirely rather than persisting an empty artifact.
    ///
    /// # Returns
    ///
    /// Whether any task was removed.
    fn clear_with_status(&self, key: StoreKey, status: TaskStatus) -> Result<bool, Error>;

    /// Unconditionally removes the member's task list. Not an error if no
    /// list exists.
    fn delete_all(&self, key: StoreKey) -> Result<(), Error>;
}
