//! Repository port for owner-scoped task persistence.

use super::TaskQuery;
use crate::task::domain::{OwnerId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every read and delete takes the requesting owner. A task belonging to a
/// different owner is indistinguishable from a missing one.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task, scoped to [`Task::owner`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the owner has no task
    /// with this identifier.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the owner has no task
    /// with this identifier.
    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds one of the owner's tasks by identifier.
    ///
    /// Returns `None` when the task does not exist or belongs to someone else.
    async fn find_by_id(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the owner's tasks matching `query`, in the query's order.
    async fn list(&self, owner: OwnerId, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found in the owner's scope.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
