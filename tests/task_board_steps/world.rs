//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::{ManualClock, instant};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    account::{
        adapters::{hashing::Argon2PasswordHasher, memory::InMemoryUserRepository},
        services::{AccountService, RegisterUserRequest},
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{OwnerId, Task},
        services::{TaskLifecycleError, TaskLifecycleService},
    },
};

/// Account service used by the BDD world.
pub type TestAccountService =
    AccountService<InMemoryUserRepository, Argon2PasswordHasher, DefaultClock>;

/// Task service used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, ManualClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub accounts: TestAccountService,
    pub tasks: TestTaskService,
    pub clock: Arc<ManualClock>,
    pub owner: Option<OwnerId>,
    pub last_task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskBoardWorld {
    /// Creates a world with empty storage and a clock at a fixed start.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::at(instant("2025-11-03T09:00:00Z")));
        let accounts = AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(DefaultClock),
        );
        let tasks = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&clock),
        );

        Self {
            accounts,
            tasks,
            clock,
            owner: None,
            last_task: None,
            last_result: None,
        }
    }

    /// Returns the signed-in owner.
    ///
    /// # Errors
    ///
    /// Returns an error if no user has been registered yet.
    pub fn owner(&self) -> Result<OwnerId, eyre::Report> {
        self.owner
            .ok_or_else(|| eyre::eyre!("missing registered user in scenario world"))
    }

    /// Returns the most recently created or moved task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task exists yet.
    pub fn last_task(&self) -> Result<&Task, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Registers a user and returns their task owner reference.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub fn register(&self, email: &str) -> Result<OwnerId, eyre::Report> {
        let request = RegisterUserRequest {
            email: email.to_owned(),
            first_name: String::new(),
            last_name: String::new(),
            password: "board-password".to_owned(),
            password_confirm: "board-password".to_owned(),
        };
        let user = run_async(self.accounts.register(request))?;
        Ok(user.id().as_owner())
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::new()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
