//! Plain-text password accepted at registration.

use super::AccountDomainError;
use std::fmt;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A confirmed password awaiting hashing.
///
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Validates a password against its confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::PasswordTooShort`] below
    /// [`MIN_PASSWORD_LENGTH`] characters, or
    /// [`AccountDomainError::PasswordMismatch`] when the confirmation differs.
    pub fn confirmed(
        password: impl Into<String>,
        confirmation: &str,
    ) -> Result<Self, AccountDomainError> {
        let secret = password.into();
        if secret.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountDomainError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if secret != confirmation {
            return Err(AccountDomainError::PasswordMismatch);
        }
        Ok(Self(secret))
    }

    /// Returns the plain-text secret for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
