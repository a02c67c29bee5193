//! Taskboard: per-user task management backend.
//!
//! Users register and sign in, then keep a private list of tasks that move
//! across a three-column board. The crate provides the domain rules, storage
//! ports with in-memory and `PostgreSQL` adapters, and the services an HTTP
//! layer calls into.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, hashing)
//!
//! # Modules
//!
//! - [`account`]: Registration, credential checks, and profiles
//! - [`task`]: Owner-scoped tasks, board grouping, and statistics
//! - [`config`]: Layered runtime configuration
//! - [`db`]: Connection pool construction
//! - [`telemetry`]: Tracing subscriber setup

pub mod account;
pub mod config;
pub mod db;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
