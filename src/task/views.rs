//! Serialisable read models returned to API callers.

use crate::task::domain::{OwnerId, Task, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full task record with derived fields evaluated at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Owning user.
    pub owner: OwnerId,
    /// Title.
    pub title: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Board status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion timestamp, set while done.
    pub completed_at: Option<DateTime<Utc>>,
    /// Whether the task is open and past its due date.
    pub is_overdue: bool,
    /// Calendar days until the due date; negative once past.
    pub days_until_due: Option<i64>,
}

impl TaskView {
    /// Builds a view of `task` as seen at `now`.
    #[must_use]
    pub fn at(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id(),
            owner: task.owner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            priority: task.priority(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            due_date: task.due_date(),
            completed_at: task.completed_at(),
            is_overdue: task.is_overdue(now),
            days_until_due: task.days_until_due(now.date_naive()),
        }
    }
}

/// Tasks partitioned into board columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanBoard<T> {
    /// Tasks not yet started.
    pub todo: Vec<T>,
    /// Tasks underway.
    pub in_progress: Vec<T>,
    /// Finished tasks.
    pub done: Vec<T>,
}

impl<T> KanbanBoard<T> {
    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[T] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Returns the total number of cards on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns `true` when every column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts every card, keeping column order.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> KanbanBoard<U> {
        KanbanBoard {
            todo: self.todo.into_iter().map(&mut f).collect(),
            in_progress: self.in_progress.into_iter().map(&mut f).collect(),
            done: self.done.into_iter().map(&mut f).collect(),
        }
    }
}

impl<T> Default for KanbanBoard<T> {
    fn default() -> Self {
        Self {
            todo: Vec::new(),
            in_progress: Vec::new(),
            done: Vec::new(),
        }
    }
}

/// Summary counts over one owner's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Every task.
    pub total: usize,
    /// Tasks in `todo`.
    pub todo: usize,
    /// Tasks in `in_progress`.
    pub in_progress: usize,
    /// Tasks in `done`.
    pub done: usize,
    /// High-priority tasks regardless of status.
    pub high_priority: usize,
    /// Open tasks past their due date.
    pub overdue: usize,
}
