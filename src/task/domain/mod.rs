//! Domain model for per-user task management.
//!
//! The task domain holds the aggregate, its field validation, and the
//! completion-stamping rule. Infrastructure concerns stay outside of the
//! domain boundary.

mod error;
mod ids;
mod status;
mod task;
mod title;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{OwnerId, TaskId};
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft, completion_stamp};
pub use title::{MAX_TITLE_LENGTH, TaskTitle};
