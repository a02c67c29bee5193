//! Per-user task management.
//!
//! Tasks move across a three-column board (`todo`, `in_progress`, `done`).
//! Entering `done` stamps a completion time, leaving it clears the stamp, and
//! read-side helpers derive overdue lists, board groupings, and summary
//! counts. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Serialisable read models in [`views`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
