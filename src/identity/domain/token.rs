//! Signed identity token values.

use super::{EmailAddress, Role, TokenWindowError};
use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use mockable::Clock;
use std::fmt;

/// Opaque signed token presented by callers.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps an encoded token.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Claims embedded in an [`AccessToken`].
///
/// The role is a snapshot taken at issue time and can go stale relative to
/// the credential store until the token expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    subject: EmailAddress,
    role: Role,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Creates claims issued now and valid for `ttl`.
    ///
    /// Both instants are truncated to whole seconds, matching the precision
    /// of the encoded `iat` and `exp` claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenWindowError::ExpiryOutOfRange`] when the expiry instant
    /// cannot be represented.
    pub fn issue(
        subject: EmailAddress,
        role: Role,
        ttl: TimeDelta,
        clock: &impl Clock,
    ) -> Result<Self, TokenWindowError> {
        let issued_at = clock.utc().trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenWindowError::ExpiryOutOfRange)?
            .trunc_subsecs(0);
        Ok(Self {
            subject,
            role,
            issued_at,
            expires_at,
        })
    }

    /// Reconstructs claims decoded from a token.
    #[must_use]
    pub const fn from_parts(
        subject: EmailAddress,
        role: Role,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject,
            role,
            issued_at,
            expires_at,
        }
    }

    /// Returns the subject identity.
    #[must_use]
    pub const fn subject(&self) -> &EmailAddress {
        &self.subject
    }

    /// Returns the role snapshot.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the issue instant.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns the expiry instant.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Checks that `now` falls inside `[issued_at, expires_at)`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenWindowError`] describing why the window rejects `now`.
    pub fn check_window(&self, now: DateTime<Utc>) -> Result<(), TokenWindowError> {
        if self.expires_at <= self.issued_at {
            return Err(TokenWindowError::InvalidTimeWindow);
        }
        if now < self.issued_at {
            return Err(TokenWindowError::NotYetValid);
        }
        if now >= self.expires_at {
            return Err(TokenWindowError::Expired);
        }
        Ok(())
    }
}
