//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address is empty, lacks `@`, or contains whitespace.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The first name is empty after trimming.
    #[error("first name must not be empty")]
    EmptyFirstName,

    /// The last name is empty after trimming.
    #[error("last name must not be empty")]
    EmptyLastName,

    /// The stored password credential is empty.
    #[error("password credential must not be empty")]
    EmptyCredential,

    /// The password hasher rejected the secret or salt.
    #[error("failed to hash password: {0}")]
    CredentialHashing(String),
}

impl IdentityDomainError {
    /// Returns the name of the input field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "email",
            Self::EmptyFirstName => "first_name",
            Self::EmptyLastName => "last_name",
            Self::EmptyCredential | Self::CredentialHashing(_) => "password",
        }
    }
}

/// Error returned while parsing a role name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Reasons a token's validity window cannot be built or rejects the current
/// instant.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TokenWindowError {
    /// The expiry instant is not after the issue instant.
    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    /// The token claims to be issued in the future.
    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    /// The expiry instant has passed.
    #[error("token has expired")]
    Expired,

    /// Adding the lifetime to the issue instant leaves the supported range.
    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
}
