//! Persistence adapters for the task module.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe storage for tests
//! - [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence through
//!   Diesel

pub mod memory;
pub mod postgres;
