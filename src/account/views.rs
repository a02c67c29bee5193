//! Serialisable read models for user profiles.

use crate::account::domain::{User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a user; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    /// User identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// First and last name joined.
    pub name: String,
    /// Registration timestamp.
    pub date_joined: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().as_str().to_owned(),
            first_name: user.first_name().as_str().to_owned(),
            last_name: user.last_name().as_str().to_owned(),
            name: user.full_name(),
            date_joined: user.date_joined(),
        }
    }
}
