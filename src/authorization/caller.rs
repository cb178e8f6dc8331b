//! Verified caller identity.

use crate::identity::domain::{EmailAddress, Role, TokenClaims};

/// Identity and role snapshot decoded from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    email: EmailAddress,
    role: Role,
}

impl Caller {
    /// Creates a caller from an already verified identity.
    #[must_use]
    pub const fn new(email: EmailAddress, role: Role) -> Self {
        Self { email, role }
    }

    /// Returns the caller's email identity.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the role snapshot.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

impl From<TokenClaims> for Caller {
    fn from(claims: TokenClaims) -> Self {
        Self::new(claims.subject().clone(), claims.role())
    }
}
