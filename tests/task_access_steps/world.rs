//! Shared world state for task access BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use crate::test_helpers::MutableClock;
use chrono::TimeDelta;
use eyre::eyre;
use rstest::fixture;
use taskgate::authorization::Caller;
use taskgate::config::TokenConfig;
use taskgate::error::ErrorKind;
use taskgate::identity::{
    adapters::{JwtTokenSigner, Argon2CredentialVerifier, memory::InMemoryUserRepository},
    domain::{AccessToken, User},
    services::{TokenService, UserDirectoryService},
};
use taskgate::task::{
    adapters::memory::InMemoryTaskRepository, domain::Task, services::TaskLifecycleService,
};

/// Token service used by the BDD world.
pub type TestTokenService =
    TokenService<InMemoryUserRepository, JwtTokenSigner, Argon2CredentialVerifier, MutableClock>;
/// User directory used by the BDD world.
pub type TestDirectoryService = UserDirectoryService<InMemoryUserRepository, MutableClock>;
/// Task lifecycle service used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryUserRepository, MutableClock>;

/// Scenario world for task access behaviour tests.
pub struct TaskAccessWorld {
    pub clock: Arc<MutableClock>,
    pub tokens: TestTokenService,
    pub directory: TestDirectoryService,
    pub tasks: TestTaskService,
    pub credentials: Argon2CredentialVerifier,
    pub admin_email: Option<String>,
    pub accounts: HashMap<String, User>,
    pub callers: HashMap<String, Caller>,
    pub issued_tokens: HashMap<String, AccessToken>,
    pub current_task: Option<Task>,
    pub deleted_task: Option<Task>,
    pub outcome: Option<Result<(), ErrorKind>>,
}

impl TaskAccessWorld {
    /// Creates a world with empty stores and a one hour token lifetime.
    #[must_use]
    pub fn new() -> Self {
        let config = TokenConfig::new("scenario-secret", TimeDelta::hours(1))
            .unwrap_or_else(|err| panic!("scenario token config: {err}"));
        let users = Arc::new(InMemoryUserRepository::new());
        let clock = Arc::new(MutableClock::default());
        let credentials = Argon2CredentialVerifier::new();

        Self {
            tokens: TokenService::new(
                Arc::clone(&users),
                Arc::new(JwtTokenSigner::from_config(&config)),
                Arc::new(credentials),
                Arc::clone(&clock),
                &config,
            ),
            directory: UserDirectoryService::new(Arc::clone(&users), Arc::clone(&clock)),
            tasks: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                users,
                Arc::clone(&clock),
            ),
            clock,
            credentials,
            admin_email: None,
            accounts: HashMap::new(),
            callers: HashMap::new(),
            issued_tokens: HashMap::new(),
            current_task: None,
            deleted_task: None,
            outcome: None,
        }
    }

    /// Returns the logged-in caller for `email`.
    pub fn caller(&self, email: &str) -> Result<Caller, eyre::Report> {
        self.callers
            .get(email)
            .cloned()
            .ok_or_else(|| eyre!("{email} is not logged in"))
    }

    /// Returns the stored account for `email`.
    pub fn account(&self, email: &str) -> Result<&User, eyre::Report> {
        self.accounts
            .get(email)
            .ok_or_else(|| eyre!("no account recorded for {email}"))
    }

    /// Returns the task the scenario is working on.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre!("missing current task in scenario world"))
    }

    /// Records the outcome of an operation and returns its value on success.
    pub fn record<T>(&mut self, result: Result<T, ErrorKind>) -> Option<T> {
        match result {
            Ok(value) => {
                self.outcome = Some(Ok(()));
                Some(value)
            }
            Err(kind) => {
                self.outcome = Some(Err(kind));
                None
            }
        }
    }
}

impl Default for TaskAccessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAccessWorld {
    TaskAccessWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
