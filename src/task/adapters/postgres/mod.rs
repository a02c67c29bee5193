//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

#[cfg(test)]
pub(crate) use models::TaskRow;
#[cfg(test)]
pub(crate) use repository::{row_to_task, to_new_row};
pub use repository::{PostgresTaskRepository, TaskPgPool};
