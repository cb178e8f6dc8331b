//! Failure taxonomy and outcome markers shared by every service.
//!
//! Each service owns a typed error enum. Those enums expose a `kind()` so that
//! a transport layer can map failures to statuses without inspecting
//! messages.

use std::fmt;
use std::ops::Deref;

/// Broad classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The presented identity or secret was not accepted.
    AuthenticationFailed,
    /// The presented token is past its expiry instant.
    TokenExpired,
    /// The presented token could not be decoded or its signature is invalid.
    TokenMalformed,
    /// The caller is authenticated but the action is not permitted.
    AuthorizationDenied,
    /// A referenced task or user does not exist.
    EntityNotFound,
    /// Input failed a domain rule (duplicate email, non-employee assignee,
    /// admin elevation, empty fields).
    ValidationFailed,
    /// The request conflicts with the current entity state.
    Conflict,
    /// A collaborator failed in a way the caller cannot correct.
    Internal,
}

impl ErrorKind {
    /// Returns a stable snake-case label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::TokenExpired => "token_expired",
            Self::TokenMalformed => "token_malformed",
            Self::AuthorizationDenied => "authorization_denied",
            Self::EntityNotFound => "entity_not_found",
            Self::ValidationFailed => "validation_failed",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an operation that created a new entity.
///
/// Distinguishes "created" outcomes from plain reads at the type level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created<T>(T);

impl<T> Created<T> {
    /// Wraps a freshly created value.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns the created value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Created<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> AsRef<T> for Created<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}
