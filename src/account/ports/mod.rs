//! Port contracts for user accounts.

pub mod hasher;
pub mod repository;

pub use hasher::{PasswordHashError, PasswordHasher};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
