//! Error types for account validation.

use thiserror::Error;

/// Field-level validation failures for account data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The email address is malformed.
    #[error("enter a valid email address (got '{0}')")]
    InvalidEmail(String),

    /// The password is shorter than the minimum length.
    #[error("password must be at least {min} characters long")]
    PasswordTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },

    /// The password and its confirmation differ.
    #[error("passwords don't match")]
    PasswordMismatch,

    /// A name field exceeds the persisted column width.
    #[error("{field} exceeds {max} characters")]
    NameTooLong {
        /// Offending field name.
        field: &'static str,
        /// Maximum accepted length in characters.
        max: usize,
    },
}
