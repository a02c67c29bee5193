//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod query;
pub mod repository;

pub use query::{
    OrderDirection, ParseTaskOrderingError, TaskOrdering, TaskOrderingField, TaskQuery,
};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
