//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use crate::test_helpers::MutableClock;
use chrono::{DateTime, TimeDelta, Utc};
use eyre::WrapErr;
use rstest::fixture;
use taskgate::authorization::Caller;
use taskgate::config::TokenConfig;
use taskgate::identity::{
    adapters::{JwtTokenSigner, Argon2CredentialVerifier, memory::InMemoryUserRepository},
    domain::{Role, User},
    services::{TokenService, UserDirectoryService, UserRequest},
};
use taskgate::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};

/// Token service wired to the in-memory store.
pub type Tokens =
    TokenService<InMemoryUserRepository, JwtTokenSigner, Argon2CredentialVerifier, MutableClock>;
/// User directory wired to the in-memory store.
pub type Directory = UserDirectoryService<InMemoryUserRepository, MutableClock>;
/// Task lifecycle service wired to the in-memory stores.
pub type Tasks = TaskLifecycleService<InMemoryTaskRepository, InMemoryUserRepository, MutableClock>;

/// Every service sharing one user store, one task store, and one clock.
pub struct Platform {
    pub clock: Arc<MutableClock>,
    pub tokens: Tokens,
    pub directory: Directory,
    pub tasks: Tasks,
    credentials: Argon2CredentialVerifier,
}

impl Platform {
    /// Wires the services with a one hour token lifetime.
    pub fn new() -> Self {
        let config = TokenConfig::new("integration-secret", TimeDelta::hours(1))
            .expect("valid token config");
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
        }
    }

    /// Builds a directory request with an encoded credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret cannot be encoded.
    pub fn request(&self, email: &str, secret: &str, role: Role) -> eyre::Result<UserRequest> {
        let credential = self
            .credentials
            .encode(secret)
            .wrap_err("encode credential")?;
        Ok(UserRequest::new(email, "Test", "User", credential, role))
    }

    /// Registers the bootstrap admin.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn register_admin(&self, email: &str, secret: &str) -> eyre::Result<User> {
        let request = self.request(email, secret, Role::Admin)?;
        let created = self
            .directory
            .register_first_admin(request)
            .await
            .wrap_err("register admin")?;
        Ok(created.into_inner())
    }

    /// Creates a non-admin account through the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails.
    pub async fn create_user(
        &self,
        admin: &Caller,
        email: &str,
        secret: &str,
        role: Role,
    ) -> eyre::Result<User> {
        let request = self.request(email, secret, role)?;
        let created = self
            .directory
            .create_user(admin, request)
            .await
            .wrap_err_with(|| format!("create {role} account {email}"))?;
        Ok(created.into_inner())
    }

    /// Authenticates and verifies in one step, as a boundary layer would.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication or verification fails.
    pub async fn login(&self, email: &str, secret: &str) -> eyre::Result<Caller> {
        let issued = self
            .tokens
            .authenticate(email, secret)
            .await
            .wrap_err_with(|| format!("authenticate {email}"))?;
        self.tokens
            .verify(&issued.token)
            .wrap_err_with(|| format!("verify token for {email}"))
    }
}

/// An admin, a manager, and two employees, all logged in.
pub struct Staff {
    pub admin: Caller,
    pub manager: Caller,
    pub employee: User,
    pub employee_caller: Caller,
    pub colleague: User,
    pub colleague_caller: Caller,
}

/// Registers and logs in a standard set of accounts.
///
/// # Errors
///
/// Returns an error if any account setup step fails.
pub async fn staff(platform: &Platform) -> eyre::Result<Staff> {
    platform.register_admin("admin@example.com", "admin-pass").await?;
    let admin = platform.login("admin@example.com", "admin-pass").await?;
    platform
        .create_user(&admin, "manager@example.com", "manager-pass", Role::Manager)
        .await?;
    let employee = platform
        .create_user(&admin, "employee@example.com", "employee-pass", Role::Employee)
        .await?;
    let colleague = platform
        .create_user(&admin, "colleague@example.com", "colleague-pass", Role::Employee)
        .await?;

    Ok(Staff {
        manager: platform.login("manager@example.com", "manager-pass").await?,
        employee_caller: platform.login("employee@example.com", "employee-pass").await?,
        colleague_caller: platform.login("colleague@example.com", "colleague-pass").await?,
        admin,
        employee,
        colleague,
    })
}

/// Provides a freshly wired platform for each test.
#[fixture]
pub fn platform() -> Platform {
    Platform::new()
}

/// A deadline a week after the fixture clock start.
pub fn deadline() -> DateTime<Utc> {
    crate::test_helpers::fixture_timestamp() + TimeDelta::days(7)
}
