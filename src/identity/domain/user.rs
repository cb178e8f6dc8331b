//! User account aggregate.

use super::{EmailAddress, IdentityDomainError, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;

/// Stored password credential.
///
/// Opaque to the core: it is produced and checked by a
/// [`CredentialVerifier`](crate::identity::ports::CredentialVerifier) and is
/// never inspected or transformed here.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential(String);

impl PasswordCredential {
    /// Wraps an already-encoded credential.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyCredential`] for an empty value.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdentityDomainError::EmptyCredential);
        }
        Ok(Self(value))
    }

    /// Returns the encoded credential.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordCredential(<redacted>)")
    }
}

/// Validated mutable account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    email: EmailAddress,
    first_name: String,
    last_name: String,
    credential: PasswordCredential,
    role: Role,
}

impl UserDetails {
    /// Validates account fields.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when the email is malformed or a name
    /// is blank.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        credential: PasswordCredential,
        role: Role,
    ) -> Result<Self, IdentityDomainError> {
        let email = EmailAddress::new(email)?;
        let first_name = non_blank(first_name.into(), IdentityDomainError::EmptyFirstName)?;
        let last_name = non_blank(last_name.into(), IdentityDomainError::EmptyLastName)?;
        Ok(Self {
            email,
            first_name,
            last_name,
            credential,
            role,
        })
    }

    /// Replaces the requested role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Returns the account email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the requested role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

fn non_blank(value: String, error: IdentityDomainError) -> Result<String, IdentityDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

/// User account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    first_name: String,
    last_name: String,
    credential: PasswordCredential,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new account from validated details.
    #[must_use]
    pub fn new(details: UserDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let UserDetails {
            email,
            first_name,
            last_name,
            credential,
            role,
        } = details;
        Self {
            id: UserId::new(),
            email,
            first_name,
            last_name,
            credential,
            role,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the account email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the stored credential.
    #[must_use]
    pub const fn credential(&self) -> &PasswordCredential {
        &self.credential
    }

    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces every mutable field. The identifier and creation time are
    /// preserved.
    pub fn apply(&mut self, details: UserDetails, clock: &impl Clock) {
        let UserDetails {
            email,
            first_name,
            last_name,
            credential,
            role,
        } = details;
        self.email = email;
        self.first_name = first_name;
        self.last_name = last_name;
        self.credential = credential;
        self.role = role;
        self.updated_at = clock.utc();
    }
}
