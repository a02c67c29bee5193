//! Shared fixtures for in-memory integration tests.

use crate::test_helpers::{ManualClock, instant};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskboard::{
    account::{
        adapters::{hashing::Argon2PasswordHasher, memory::InMemoryUserRepository},
        domain::User,
        services::{AccountService, RegisterUserRequest},
    },
    task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService},
};

/// Account service wired to in-memory storage and real Argon2 hashing.
pub type Accounts = AccountService<InMemoryUserRepository, Argon2PasswordHasher, DefaultClock>;

/// Task service driven by a manual clock.
pub type Tasks = TaskLifecycleService<InMemoryTaskRepository, ManualClock>;

/// Services sharing one clock so tests can move time forward.
pub struct Workspace {
    /// Task service.
    pub tasks: Tasks,
    /// Clock shared with the task service.
    pub clock: Arc<ManualClock>,
}

/// Provides an account service backed by fresh storage.
#[fixture]
pub fn accounts() -> Accounts {
    AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(DefaultClock),
    )
}

/// Provides a task service whose clock starts on a fixed Monday morning.
#[fixture]
pub fn workspace() -> Workspace {
    let clock = Arc::new(ManualClock::at(instant("2025-09-01T08:00:00Z")));
    let tasks = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&clock),
    );
    Workspace { tasks, clock }
}

/// Builds a registration request with matching passwords.
#[must_use]
pub fn registration(email: &str, password: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        email: email.to_owned(),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        password: password.to_owned(),
        password_confirm: password.to_owned(),
    }
}

/// Registers a user with a fixed password.
///
/// # Errors
///
/// Returns an error if registration fails.
pub async fn register(accounts: &Accounts, email: &str) -> Result<User, eyre::Report> {
    Ok(accounts
        .register(registration(email, "s3cure-enough"))
        .await?)
}
