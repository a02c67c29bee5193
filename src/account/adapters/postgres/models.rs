//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Normalised login email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Password hash.
    pub password_hash: String,
    /// Registration timestamp.
    pub date_joined: DateTime<Utc>,
    /// Last profile change.
    pub updated_at: DateTime<Utc>,
}

/// Profile columns written on update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserProfileChangeset {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Last profile change.
    pub updated_at: DateTime<Utc>,
}
