//! Adapters for the account module.
//!
//! - [`memory::InMemoryUserRepository`]: thread-safe storage for tests
//! - [`postgres::PostgresUserRepository`]: `PostgreSQL` persistence through
//!   Diesel
//! - [`hashing::Argon2PasswordHasher`]: Argon2id password hashing

pub mod hashing;
pub mod memory;
pub mod postgres;
