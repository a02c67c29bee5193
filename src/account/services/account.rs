//! Registration, login, and profile management.

use crate::account::{
    domain::{AccountDomainError, EmailAddress, Password, PersonName, User, UserId},
    ports::{PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Registration payload as submitted by a client.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    /// Login email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Plain-text password.
    pub password: String,
    /// Repeated password.
    pub password_confirm: String,
}

impl std::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Partial profile update. Unset names are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    /// Replacement first name.
    pub first_name: Option<String>,
    /// Replacement last name.
    pub last_name: Option<String>,
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Field validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),
    /// The email is already registered.
    #[error("user with this email already exists: {0}")]
    DuplicateEmail(EmailAddress),
    /// Unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The user does not exist.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// Password hashing failed.
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(UserRepositoryError),
}

impl AccountError {
    /// Returns `true` for errors caused by invalid caller input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::DuplicateEmail(_))
    }
}

impl From<UserRepositoryError> for AccountError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            UserRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ UserRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Account orchestration service.
#[derive(Clone)]
pub struct AccountService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> AccountService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            clock,
        }
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] for invalid fields,
    /// [`AccountError::DuplicateEmail`] when the email is taken, or a hashing
    /// or repository error.
    pub async fn register(&self, request: RegisterUserRequest) -> AccountResult<User> {
        let RegisterUserRequest {
            email,
            first_name,
            last_name,
            password,
            password_confirm,
        } = request;

        let address = EmailAddress::new(email)?;
        let first = PersonName::new("first_name", first_name)?;
        let last = PersonName::new("last_name", last_name)?;
        let secret = Password::confirmed(password, &password_confirm)?;

        if self.repository.find_by_email(&address).await?.is_some() {
            return Err(AccountError::DuplicateEmail(address));
        }

        let hash = self.hash(secret).await?;
        let user = User::register(address, first, last, hash, &*self.clock);
        self.repository.store(&user).await?;
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    /// Checks an email and password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] for an unknown email or a
    /// wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AccountResult<User> {
        let Ok(address) = EmailAddress::new(email) else {
            return Err(AccountError::InvalidCredentials);
        };
        let Some(user) = self.repository.find_by_email(&address).await? else {
            tracing::debug!(email = %address, "login for unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let hasher = Arc::clone(&self.hasher);
        let secret = password.to_owned();
        let stored = user.password_hash().to_owned();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&secret, &stored))
            .await
            .map_err(|err| PasswordHashError(err.to_string()))??;

        if !verified {
            tracing::debug!(user_id = %user.id(), "login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Fetches a user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] when the user does not exist.
    pub async fn profile(&self, id: UserId) -> AccountResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Updates the supplied name fields.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] when the user does not exist,
    /// [`AccountError::Domain`] for an over-long name, or a repository error.
    pub async fn update_profile(
        &self,
        id: UserId,
        request: UpdateProfileRequest,
    ) -> AccountResult<User> {
        let first = request
            .first_name
            .map(|name| PersonName::new("first_name", name))
            .transpose()?;
        let last = request
            .last_name
            .map(|name| PersonName::new("last_name", name))
            .transpose()?;

        let mut user = self.profile(id).await?;
        user.rename(first, last, &*self.clock);
        self.repository.update(&user).await?;
        tracing::debug!(user_id = %id, "profile updated");
        Ok(user)
    }

    async fn hash(&self, secret: Password) -> AccountResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let hash = tokio::task::spawn_blocking(move || hasher.hash(secret.expose()))
            .await
            .map_err(|err| PasswordHashError(err.to_string()))??;
        Ok(hash)
    }
}
