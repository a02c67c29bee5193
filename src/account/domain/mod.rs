//! Domain model for user accounts.
//!
//! Tasks only need a stable owner reference; this context supplies it along
//! with registration and credential checks.

mod email;
mod error;
mod ids;
mod password;
mod user;

pub use email::EmailAddress;
pub use error::AccountDomainError;
pub use ids::UserId;
pub use password::{MIN_PASSWORD_LENGTH, Password};
pub use user::{MAX_NAME_LENGTH, PersistedUserData, PersonName, User};
