//! Task aggregate root and its lifecycle rules.

use super::{OwnerId, TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskTitle};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::Serialize;

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with the given title and default priority.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            priority: TaskPriority::default(),
            due_date: None,
        }
    }

    /// Sets the description. Blank text is treated as no description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Field changes applied to an existing task.
///
/// `None` leaves a field untouched. Description and due date use a nested
/// option so callers can clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<TaskTitle>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description. Blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(normalize_description(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
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
}

/// Task aggregate root.
///
/// Not deserialisable; build tasks through [`Task::new`] or
/// [`Task::from_persisted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    owner: OwnerId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning user.
    pub owner: OwnerId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new `todo` task owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateNotAfterCreation`] when the draft due
    /// date is not strictly after the creation time read from `clock`.
    pub fn new(
        owner: OwnerId,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let timestamp = clock.utc();
        if let Some(due_date) = draft.due_date {
            ensure_due_after_creation(due_date, timestamp)?;
        }

        let status = TaskStatus::Todo;
        Ok(Self {
            id: TaskId::new(),
            owner,
            title: draft.title,
            description: draft.description,
            status,
            priority: draft.priority,
            created_at: timestamp,
            updated_at: timestamp,
            due_date: draft.due_date,
            completed_at: completion_stamp(status, None, timestamp),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            created_at: data.created_at,
            updated_at: data.updated_at,
            due_date: data.due_date,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the completion timestamp; set exactly when the task is done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Applies a change set, then re-derives the completion timestamp.
    ///
    /// Validation runs before any field is touched, so a rejected change
    /// leaves the task as it was.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateNotAfterCreation`] when a new due
    /// date is not strictly after [`Task::created_at`].
    pub fn apply(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(Some(due_date)) = changes.due_date {
            ensure_due_after_creation(due_date, self.created_at)?;
        }

        let TaskChanges {
            title,
            description,
            status,
            priority,
            due_date,
        } = changes;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date;
        }

        self.persist_write(clock);
        Ok(())
    }

    /// Moves the task to another board column.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.persist_write(clock);
    }

    /// Returns `true` when the task is open and its due date has passed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status.is_open() && self.due_date.is_some_and(|due_date| due_date < now)
    }

    /// Returns the signed number of calendar days from `today` to the due
    /// date, or `None` when no due date is set.
    #[must_use]
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date
            .map(|due_date| due_date.date_naive().signed_duration_since(today).num_days())
    }

    /// Stamps `updated_at` and re-derives `completed_at` for a write.
    fn persist_write(&mut self, clock: &impl Clock) {
        let now = clock.utc();
        self.completed_at = completion_stamp(self.status, self.completed_at, now);
        self.updated_at = now;
    }
}

/// Derives the completion timestamp for a task being written with `status`.
///
/// A task entering `done` keeps an existing stamp or receives `now`; any
/// other status clears the stamp.
#[must_use]
pub const fn completion_stamp(
    status: TaskStatus,
    completed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (status, completed_at) {
        (TaskStatus::Done, Some(stamp)) => Some(stamp),
        (TaskStatus::Done, None) => Some(now),
        (TaskStatus::Todo | TaskStatus::InProgress, _) => None,
    }
}

fn ensure_due_after_creation(
    due_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
) -> Result<(), TaskDomainError> {
    if due_date <= created_at {
        return Err(TaskDomainError::DueDateNotAfterCreation {
            due_date,
            created_at,
        });
    }
    Ok(())
}

fn normalize_description(description: String) -> Option<String> {
    if description.trim().is_empty() {
        None
    } else {
        Some(description)
    }
}
