//! Service layer for owner-scoped task operations.

use super::stats;
use crate::task::{
    domain::{
        OwnerId, ParseTaskPriorityError, ParseTaskStatusError, Task, TaskChanges,
        TaskDomainError, TaskDraft, TaskId, TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
    views::{KanbanBoard, TaskStats, TaskView},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority label (`low`, `medium`, or `high`).
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Request payload for a full or partial task update.
///
/// Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<String>,
    priority: Option<String>,
    due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the status label (`todo`, `in_progress`, or `done`).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Parses every supplied field into domain changes.
    fn into_changes(self) -> TaskLifecycleResult<TaskChanges> {
        let Self {
            title,
            description,
            status,
            priority,
            due_date,
        } = self;

        let mut changes = TaskChanges::new();
        if let Some(raw_title) = title {
            changes = changes.with_title(TaskTitle::new(raw_title)?);
        }
        match description {
            Some(Some(text)) => changes = changes.with_description(text),
            Some(None) => changes = changes.clear_description(),
            None => {}
        }
        if let Some(raw_status) = status {
            changes = changes.with_status(TaskStatus::try_from(raw_status.as_str())?);
        }
        if let Some(raw_priority) = priority {
            changes = changes.with_priority(TaskPriority::try_from(raw_priority.as_str())?);
        }
        match due_date {
            Some(Some(date)) => changes = changes.with_due_date(date),
            Some(None) => changes = changes.clear_due_date(),
            None => {}
        }
        Ok(changes)
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The supplied status label is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The supplied priority label is not a known priority.
    #[error(transparent)]
    InvalidPriority(#[from] ParseTaskPriorityError),
    /// The task does not exist in the requesting owner's scope.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns `true` for errors caused by invalid caller input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::InvalidStatus(_) | Self::InvalidPriority(_)
        )
    }
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task orchestration service.
///
/// Every operation takes the requesting owner; tasks of other owners behave
/// as if they did not exist.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a `todo` task for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails or the repository
    /// rejects persistence. Nothing is stored on validation failure.
    pub async fn create(
        &self,
        owner: OwnerId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            priority,
            due_date,
        } = request;

        let mut draft = TaskDraft::new(TaskTitle::new(title)?);
        if let Some(text) = description {
            draft = draft.with_description(text);
        }
        if let Some(label) = priority {
            draft = draft.with_priority(TaskPriority::try_from(label.as_str())?);
        }
        if let Some(date) = due_date {
            draft = draft.with_due_date(date);
        }

        let task = Task::new(owner, draft, &*self.clock)?;
        self.repository.store(&task).await?;
        tracing::info!(owner = %owner, task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Applies a full or partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the owner has no such
    /// task, a validation variant when input is invalid, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn update(
        &self,
        owner: OwnerId,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let changes = request.into_changes()?;
        let mut task = self.get(owner, id).await?;
        task.apply(changes, &*self.clock)?;
        self.repository.update(&task).await?;
        tracing::debug!(
            owner = %owner,
            task_id = %id,
            status = %task.status(),
            "task updated"
        );
        Ok(task)
    }

    /// Changes only the status, as a board drag-and-drop would.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for unknown labels,
    /// [`TaskLifecycleError::NotFound`] when the owner has no such task, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn update_status(
        &self,
        owner: OwnerId,
        id: TaskId,
        status: &str,
    ) -> TaskLifecycleResult<Task> {
        let target = TaskStatus::try_from(status)?;
        let mut task = self.get(owner, id).await?;
        task.set_status(target, &*self.clock);
        self.repository.update(&task).await?;
        tracing::debug!(
            owner = %owner,
            task_id = %id,
            status = %target,
            "task status changed"
        );
        Ok(task)
    }

    /// Deletes one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the owner has no such
    /// task or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskLifecycleResult<()> {
        self.repository.delete(owner, id).await?;
        tracing::info!(owner = %owner, task_id = %id, "task deleted");
        Ok(())
    }

    /// Fetches one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the owner has no such
    /// task or [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn get(&self, owner: OwnerId, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Lists the owner's tasks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list(
        &self,
        owner: OwnerId,
        query: &TaskQuery,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(owner, query).await?)
    }

    /// Groups the owner's tasks into board columns, newest first per column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn kanban(&self, owner: OwnerId) -> TaskLifecycleResult<KanbanBoard<Task>> {
        let tasks = self.list(owner, &TaskQuery::new()).await?;
        Ok(stats::kanban(tasks))
    }

    /// Returns the owner's open tasks whose due date has passed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn overdue(&self, owner: OwnerId) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.list(owner, &TaskQuery::new()).await?;
        let now = self.clock.utc();
        Ok(stats::overdue(&tasks, now).into_iter().cloned().collect())
    }

    /// Summarises the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn stats(&self, owner: OwnerId) -> TaskLifecycleResult<TaskStats> {
        let tasks = self.list(owner, &TaskQuery::new()).await?;
        Ok(stats::stats(&tasks, self.clock.utc()))
    }

    /// Renders a task with derived fields evaluated at the current time.
    #[must_use]
    pub fn view(&self, task: &Task) -> TaskView {
        TaskView::at(task, self.clock.utc())
    }
}
