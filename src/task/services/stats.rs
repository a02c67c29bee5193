//! Read-side aggregation over an owner's tasks.
//!
//! These functions take a collection already scoped to one owner; scoping
//! is the caller's job.

use crate::task::domain::{Task, TaskPriority, TaskStatus};
use crate::task::views::{KanbanBoard, TaskStats};
use chrono::{DateTime, Utc};

/// Returns the open tasks whose due date lies before `now`, in input order.
#[must_use]
pub fn overdue(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_overdue(now)).collect()
}

/// Counts tasks by status and priority, plus overdue ones.
#[must_use]
pub fn stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let count_status =
        |status: TaskStatus| tasks.iter().filter(|task| task.status() == status).count();

    TaskStats {
        total: tasks.len(),
        todo: count_status(TaskStatus::Todo),
        in_progress: count_status(TaskStatus::InProgress),
        done: count_status(TaskStatus::Done),
        high_priority: tasks
            .iter()
            .filter(|task| task.priority() == TaskPriority::High)
            .count(),
        overdue: overdue(tasks, now).len(),
    }
}

/// Partitions tasks into board columns, keeping input order per column.
#[must_use]
pub fn kanban(tasks: impl IntoIterator<Item = Task>) -> KanbanBoard<Task> {
    let mut board = KanbanBoard::default();
    for task in tasks {
        match task.status() {
            TaskStatus::Todo => board.todo.push(task),
            TaskStatus::InProgress => board.in_progress.push(task),
            TaskStatus::Done => board.done.push(task),
        }
    }
    board
}
