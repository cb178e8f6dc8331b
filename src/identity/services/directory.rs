//! User directory: registration and admin-only account management.

use crate::authorization::{
    Caller, DenialReason,
    engine::{forbid_admin_elevation, require_manage_users},
};
use crate::error::{Created, ErrorKind};
use crate::identity::{
    domain::{
        EmailAddress, IdentityDomainError, PasswordCredential, Role, User, UserDetails, UserId,
    },
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating or updating an account.
///
/// The credential must already be encoded by the credential collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest {
    email: String,
    first_name: String,
    last_name: String,
    credential: PasswordCredential,
    role: Role,
}

impl UserRequest {
    /// Creates a request with every account field.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        credential: PasswordCredential,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            credential,
            role,
        }
    }

    /// Returns the requested role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    fn into_details(self) -> Result<UserDetails, IdentityDomainError> {
        UserDetails::new(
            self.email,
            self.first_name,
            self.last_name,
            self.credential,
            self.role,
        )
    }
}

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// The authorization engine refused the request.
    #[error("request denied: {0}")]
    Denied(DenialReason),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),

    /// Another account already uses the email.
    #[error("email already in use: {0}")]
    EmailAlreadyUsed(EmailAddress),

    /// The target account does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(UserRepositoryError),
}

impl UserDirectoryError {
    /// Returns the failure kind a boundary layer should report.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Denied(reason) => reason.kind(),
            Self::Domain(_) | Self::EmailAlreadyUsed(_) => ErrorKind::ValidationFailed,
            Self::UserNotFound(_) => ErrorKind::EntityNotFound,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }

    /// Returns the offending input field for validation failures.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Denied(reason) => reason.field(),
            Self::Domain(err) => Some(err.field()),
            Self::EmailAlreadyUsed(_) => Some("email"),
            Self::UserNotFound(_) | Self::Repository(_) => None,
        }
    }
}

impl From<UserRepositoryError> for UserDirectoryError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateEmail(email) => Self::EmailAlreadyUsed(email),
            UserRepositoryError::NotFound(id) => Self::UserNotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Account registration and management service.
#[derive(Clone)]
pub struct UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Self-registration: creates an account whose role is forced to admin.
    ///
    /// No caller is required; this path is expected to sit behind the
    /// network perimeter or be used on first run.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] for invalid fields and
    /// [`UserDirectoryError::EmailAlreadyUsed`] for a taken email.
    pub async fn register_first_admin(
        &self,
        request: UserRequest,
    ) -> UserDirectoryResult<Created<User>> {
        let details = request.into_details()?.with_role(Role::Admin);
        self.ensure_email_free(details.email()).await?;

        let user = User::new(details, &*self.clock);
        self.repository.store(&user).await?;
        info!(user_id = %user.id(), email = %user.email(), "admin registered");
        Ok(Created::new(user))
    }

    /// Creates an account with any role except admin.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Denied`] for non-admin callers and for
    /// a requested admin role, [`UserDirectoryError::Domain`] for invalid
    /// fields, and [`UserDirectoryError::EmailAlreadyUsed`] for a taken
    /// email.
    pub async fn create_user(
        &self,
        caller: &Caller,
        request: UserRequest,
    ) -> UserDirectoryResult<Created<User>> {
        authorize(caller, "create_user", require_manage_users(caller.role()))?;
        authorize(caller, "create_user", forbid_admin_elevation(request.role()))?;
        let details = request.into_details()?;
        self.ensure_email_free(details.email()).await?;

        let user = User::new(details, &*self.clock);
        self.repository.store(&user).await?;
        info!(user_id = %user.id(), role = %user.role(), "user created");
        Ok(Created::new(user))
    }

    /// Replaces an account's fields.
    ///
    /// The email may change as long as no other account owns it.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Denied`] for non-admin callers and for
    /// a requested admin role, [`UserDirectoryError::UserNotFound`] for an
    /// unknown id, and [`UserDirectoryError::EmailAlreadyUsed`] when the new
    /// email belongs to another account.
    pub async fn update_user(
        &self,
        caller: &Caller,
        id: UserId,
        request: UserRequest,
    ) -> UserDirectoryResult<User> {
        authorize(caller, "update_user", require_manage_users(caller.role()))?;
        authorize(caller, "update_user", forbid_admin_elevation(request.role()))?;
        let details = request.into_details()?;

        let mut user = self.find_or_error(id).await?;
        if let Some(owner) = self.repository.find_by_email(details.email()).await?
            && owner.id() != id
        {
            return Err(UserDirectoryError::EmailAlreadyUsed(details.email().clone()));
        }

        user.apply(details, &*self.clock);
        self.repository.update(&user).await?;
        info!(user_id = %user.id(), role = %user.role(), "user updated");
        Ok(user)
    }

    /// Deletes an account and returns its last snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Denied`] for non-admin callers and
    /// [`UserDirectoryError::UserNotFound`] for an unknown id.
    pub async fn delete_user(&self, caller: &Caller, id: UserId) -> UserDirectoryResult<User> {
        authorize(caller, "delete_user", require_manage_users(caller.role()))?;
        let removed = self.repository.delete(id).await?;
        info!(user_id = %removed.id(), "user deleted");
        Ok(removed)
    }

    /// Finds an account by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Denied`] for non-admin callers and
    /// [`UserDirectoryError::UserNotFound`] for an unknown id.
    pub async fn find_by_id(&self, caller: &Caller, id: UserId) -> UserDirectoryResult<User> {
        authorize(caller, "find_user", require_manage_users(caller.role()))?;
        self.find_or_error(id).await
    }

    /// Lists every account.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Denied`] for non-admin callers.
    pub async fn list(&self, caller: &Caller) -> UserDirectoryResult<Vec<User>> {
        authorize(caller, "list_users", require_manage_users(caller.role()))?;
        Ok(self.repository.list().await?)
    }

    async fn ensure_email_free(&self, email: &EmailAddress) -> UserDirectoryResult<()> {
        if self.repository.exists_by_email(email).await? {
            return Err(UserDirectoryError::EmailAlreadyUsed(email.clone()));
        }
        Ok(())
    }

    async fn find_or_error(&self, id: UserId) -> UserDirectoryResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserDirectoryError::UserNotFound(id))
    }
}

fn authorize(
    caller: &Caller,
    operation: &'static str,
    decision: Result<(), DenialReason>,
) -> UserDirectoryResult<()> {
    decision.map_err(|reason| {
        warn!(
            operation,
            caller = %caller.email(),
            role = %caller.role(),
            %reason,
            "user directory request denied"
        );
        UserDirectoryError::Denied(reason)
    })
}
