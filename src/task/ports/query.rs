//! Filter, search, and ordering options for listing an owner's tasks.

use crate::task::domain::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

/// Sortable task fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOrderingField {
    /// Creation timestamp.
    CreatedAt,
    /// Latest mutation timestamp.
    UpdatedAt,
    /// Due date; tasks without one sort last.
    DueDate,
    /// Priority rank, `low` < `medium` < `high`.
    Priority,
}

impl TaskOrderingField {
    /// Every sortable field.
    pub const ALL: [Self; 4] = [
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::DueDate,
        Self::Priority,
    ];

    /// Returns the field name used in ordering expressions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::DueDate => "due_date",
            Self::Priority => "priority",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Ordering applied to a task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskOrdering {
    /// Field to sort by.
    pub field: TaskOrderingField,
    /// Sort direction.
    pub direction: OrderDirection,
}

impl TaskOrdering {
    /// Creates an ascending ordering on `field`.
    #[must_use]
    pub const fn ascending(field: TaskOrderingField) -> Self {
        Self {
            field,
            direction: OrderDirection::Ascending,
        }
    }

    /// Creates a descending ordering on `field`.
    #[must_use]
    pub const fn descending(field: TaskOrderingField) -> Self {
        Self {
            field,
            direction: OrderDirection::Descending,
        }
    }

    /// Compares two tasks under this ordering.
    ///
    /// Ties fall back to newest-created first, then identifier, so results
    /// are deterministic. Missing due dates sort last in either direction.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        let primary = match self.field {
            TaskOrderingField::CreatedAt => {
                self.directed(left.created_at().cmp(&right.created_at()))
            }
            TaskOrderingField::UpdatedAt => {
                self.directed(left.updated_at().cmp(&right.updated_at()))
            }
            TaskOrderingField::Priority => {
                self.directed(left.priority().rank().cmp(&right.priority().rank()))
            }
            TaskOrderingField::DueDate => match (left.due_date(), right.due_date()) {
                (Some(left_due), Some(right_due)) => self.directed(left_due.cmp(&right_due)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };

        primary
            .then_with(|| right.created_at().cmp(&left.created_at()))
            .then_with(|| left.id().into_inner().cmp(&right.id().into_inner()))
    }

    const fn directed(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            OrderDirection::Ascending => ordering,
            OrderDirection::Descending => ordering.reverse(),
        }
    }
}

impl Default for TaskOrdering {
    fn default() -> Self {
        Self::descending(TaskOrderingField::CreatedAt)
    }
}

/// Error returned for an unrecognised ordering expression.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "ordering must be one of created_at, updated_at, due_date, priority, \
     optionally prefixed with '-' (got '{0}')"
)]
pub struct ParseTaskOrderingError(pub String);

impl FromStr for TaskOrdering {
    type Err = ParseTaskOrderingError;

    /// Parses `field` or `-field`, the latter meaning descending.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (direction, name) = trimmed.strip_prefix('-').map_or(
            (OrderDirection::Ascending, trimmed),
            |rest| (OrderDirection::Descending, rest),
        );
        let field = TaskOrderingField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| ParseTaskOrderingError(value.to_owned()))?;
        Ok(Self { field, direction })
    }
}

/// Listing criteria for an owner's tasks.
///
/// All filters are optional and combine with logical AND. Date bounds are
/// inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    created_after: Option<DateTime<Utc>>,
    created_before: Option<DateTime<Utc>>,
    due_after: Option<DateTime<Utc>>,
    due_before: Option<DateTime<Utc>>,
    search: Option<String>,
    ordering: TaskOrdering,
}

impl TaskQuery {
    /// Creates a query matching every task, newest first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts results to tasks created within `[from, to]`.
    #[must_use]
    pub const fn created_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_after = from;
        self.created_before = to;
        self
    }

    /// Restricts results to tasks due within `[from, to]`.
    ///
    /// Tasks without a due date never match a due-date bound.
    #[must_use]
    pub const fn due_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.due_after = from;
        self.due_before = to;
        self
    }

    /// Restricts results to tasks whose title or description contains
    /// `term`, ignoring case. Blank terms are ignored.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let raw = term.into();
        let trimmed = raw.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Sets the result ordering.
    #[must_use]
    pub const fn ordered_by(mut self, ordering: TaskOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the priority filter.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the inclusive creation-time bounds.
    #[must_use]
    pub const fn created_range(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (self.created_after, self.created_before)
    }

    /// Returns the inclusive due-date bounds.
    #[must_use]
    pub const fn due_range(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (self.due_after, self.due_before)
    }

    /// Returns the search term.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the ordering.
    #[must_use]
    pub const fn ordering(&self) -> TaskOrdering {
        self.ordering
    }

    /// Returns `true` when `task` satisfies every filter of this query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_matches = self.status.is_none_or(|status| task.status() == status);
        let priority_matches = self
            .priority
            .is_none_or(|priority| task.priority() == priority);
        let created_matches = within(
            Some(task.created_at()),
            self.created_after,
            self.created_before,
        );
        let due_matches = if self.due_after.is_none() && self.due_before.is_none() {
            true
        } else {
            within(task.due_date(), self.due_after, self.due_before)
        };
        let search_matches = self
            .search
            .as_deref()
            .is_none_or(|term| search_hit(task, term));

        status_matches && priority_matches && created_matches && due_matches && search_matches
    }

    /// Filters and sorts `tasks` according to this query.
    #[must_use]
    pub fn apply(&self, tasks: impl IntoIterator<Item = Task>) -> Vec<Task> {
        let mut selected: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .collect();
        selected.sort_by(|left, right| self.ordering.compare(left, right));
        selected
    }
}

fn within(
    value: Option<DateTime<Utc>>,
    lower: Option<DateTime<Utc>>,
    upper: Option<DateTime<Utc>>,
) -> bool {
    value.is_some_and(|timestamp| {
        lower.is_none_or(|bound| timestamp >= bound) && upper.is_none_or(|bound| timestamp <= bound)
    })
}

fn search_hit(task: &Task, term: &str) -> bool {
    let needle = term.to_lowercase();
    let in_title = task.title().as_str().to_lowercase().contains(&needle);
    let in_description = task
        .description()
        .is_some_and(|description| description.to_lowercase().contains(&needle));
    in_title || in_description
}
