//! User aggregate owned by the account context.

use super::{AccountDomainError, EmailAddress, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum length of a first or last name.
pub const MAX_NAME_LENGTH: usize = 150;

/// Trimmed personal name; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Creates a validated name for the named field.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::NameTooLong`] beyond
    /// [`MAX_NAME_LENGTH`] characters.
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(AccountDomainError::NameTooLong {
                field,
                max: MAX_NAME_LENGTH,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = AccountDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new("name", value)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> Self {
        name.0
    }
}

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    first_name: PersonName,
    last_name: PersonName,
    password_hash: String,
    date_joined: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted first name.
    pub first_name: PersonName,
    /// Persisted last name.
    pub last_name: PersonName,
    /// Persisted password hash in PHC format.
    pub password_hash: String,
    /// Registration timestamp.
    pub date_joined: DateTime<Utc>,
    /// Latest profile change.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user with an already-hashed password.
    #[must_use]
    pub fn register(
        email: EmailAddress,
        first_name: PersonName,
        last_name: PersonName,
        password_hash: String,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            email,
            first_name,
            last_name,
            password_hash,
            date_joined: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            password_hash: data.password_hash,
            date_joined: data.date_joined,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the first name.
    #[must_use]
    pub const fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub const fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Returns `"first last"`, trimmed when either part is empty.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.as_str(), self.last_name.as_str())
            .trim()
            .to_owned()
    }

    /// Returns the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }

    /// Returns the latest profile change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the supplied name parts.
    pub fn rename(
        &mut self,
        first_name: Option<PersonName>,
        last_name: Option<PersonName>,
        clock: &impl Clock,
    ) {
        if let Some(first) = first_name {
            self.first_name = first;
        }
        if let Some(last) = last_name {
            self.last_name = last;
        }
        self.updated_at = clock.utc();
    }
}
