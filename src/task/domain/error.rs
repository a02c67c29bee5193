//! Error types for task domain validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while validating task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("title cannot be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("title exceeds {max} characters")]
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The due date does not fall strictly after the creation time.
    #[error("due date {due_date} must be after the task creation time {created_at}")]
    DueDateNotAfterCreation {
        /// Rejected due date.
        due_date: DateTime<Utc>,
        /// Creation timestamp of the task.
        created_at: DateTime<Utc>,
    },
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("status must be one of: todo, in_progress, done (got '{0}')")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("priority must be one of: low, medium, high (got '{0}')")]
pub struct ParseTaskPriorityError(pub String);
