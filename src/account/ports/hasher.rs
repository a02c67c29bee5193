//! Password hashing port.

use thiserror::Error;

/// Error raised by a password hasher.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(pub String);

/// One-way password hashing contract.
///
/// Implementations produce self-describing hashes (salt and parameters
/// embedded) so verification needs only the stored string.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plain-text password.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when hashing fails.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Checks a plain-text password against a stored hash.
    ///
    /// Returns `Ok(false)` for a wrong password.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the stored hash cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
