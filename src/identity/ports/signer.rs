//! Token signer port.

use crate::identity::domain::{AccessToken, TokenClaims};
use thiserror::Error;

/// Encodes claims into a signed token and back.
///
/// Verification is a pure function of the token and the signer's secret. It
/// checks the signature and claim shape only; the validity window is checked
/// by the caller against its own clock.
#[cfg_attr(test, mockall::automock)]
pub trait TokenSigner: Send + Sync {
    /// Signs claims into an opaque token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenSignerError::Signing`] when encoding fails.
    fn sign(&self, claims: &TokenClaims) -> Result<AccessToken, TokenSignerError>;

    /// Checks a token's signature and decodes its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenSignerError::InvalidSignature`] for a token signed with
    /// another secret and [`TokenSignerError::Malformed`] for anything that
    /// cannot be decoded.
    fn verify(&self, token: &AccessToken) -> Result<TokenClaims, TokenSignerError>;
}

/// Errors returned by token signer implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenSignerError {
    /// The token could not be decoded into claims.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The signature does not match the shared secret.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Encoding the claims failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}
