//! User accounts.
//!
//! Registration, credential checks, and profile edits. A [`domain::UserId`]
//! doubles as the owner reference for tasks. Token issuance is left to the
//! hosting application.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
