//! Credential authentication and stateless token verification.

use crate::authorization::Caller;
use crate::config::TokenConfig;
use crate::error::ErrorKind;
use crate::identity::{
    domain::{AccessToken, EmailAddress, Role, TokenClaims, TokenWindowError, UserId},
    ports::{
        CredentialVerifier, TokenSigner, TokenSignerError, UserRepository, UserRepositoryError,
    },
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Token issued after a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed token to present on later requests.
    pub token: AccessToken,
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    /// Email of the authenticated user.
    pub email: EmailAddress,
    /// Role embedded in the token.
    pub role: Role,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Service-level errors for authentication and token verification.
#[derive(Debug, Error)]
pub enum TokenServiceError {
    /// Unknown identity or mismatched secret. The two cases are not
    /// distinguished.
    #[error("invalid email or password")]
    AuthenticationFailed,

    /// The token's expiry instant has passed.
    #[error("token has expired")]
    TokenExpired,

    /// The token could not be decoded, has a bad signature, or carries an
    /// impossible validity window.
    #[error("malformed token: {0}")]
    TokenMalformed(String),

    /// Encoding a new token failed.
    #[error("token signing failed: {0}")]
    Signing(String),

    /// The configured lifetime produced an unrepresentable expiry.
    #[error("token issue failed: {0}")]
    Issue(TokenWindowError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

impl TokenServiceError {
    /// Returns the failure kind a boundary layer should report.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            Self::TokenExpired => ErrorKind::TokenExpired,
            Self::TokenMalformed(_) => ErrorKind::TokenMalformed,
            Self::Signing(_) | Self::Issue(_) | Self::Repository(_) => ErrorKind::Internal,
        }
    }
}

impl From<TokenSignerError> for TokenServiceError {
    fn from(err: TokenSignerError) -> Self {
        match err {
            TokenSignerError::Signing(message) => Self::Signing(message),
            TokenSignerError::InvalidSignature | TokenSignerError::Malformed(_) => {
                Self::TokenMalformed(err.to_string())
            }
        }
    }
}

impl From<TokenWindowError> for TokenServiceError {
    fn from(err: TokenWindowError) -> Self {
        match err {
            TokenWindowError::Expired => Self::TokenExpired,
            TokenWindowError::InvalidTimeWindow
            | TokenWindowError::NotYetValid
            | TokenWindowError::ExpiryOutOfRange => Self::TokenMalformed(err.to_string()),
        }
    }
}

/// Result type for token service operations.
pub type TokenServiceResult<T> = Result<T, TokenServiceError>;

/// Issues and verifies signed identity tokens.
#[derive(Clone)]
pub struct TokenService<R, S, V, C>
where
    R: UserRepository,
    S: TokenSigner,
    V: CredentialVerifier,
    C: Clock + Send + Sync,
{
    users: Arc<R>,
    signer: Arc<S>,
    verifier: Arc<V>,
    clock: Arc<C>,
    ttl: TimeDelta,
}

impl<R, S, V, C> TokenService<R, S, V, C>
where
    R: UserRepository,
    S: TokenSigner,
    V: CredentialVerifier,
    C: Clock + Send + Sync,
{
    /// Creates a new token service.
    #[must_use]
    pub fn new(
        users: Arc<R>,
        signer: Arc<S>,
        verifier: Arc<V>,
        clock: Arc<C>,
        config: &TokenConfig,
    ) -> Self {
        Self {
            users,
            signer,
            verifier,
            clock,
            ttl: config.ttl(),
        }
    }

    /// Checks credentials and issues a token embedding the user's role.
    ///
    /// # Errors
    ///
    /// Returns [`TokenServiceError::AuthenticationFailed`] for an unknown or
    /// malformed email and for a mismatched secret, and
    /// [`TokenServiceError::Repository`], [`TokenServiceError::Signing`] or
    /// [`TokenServiceError::Issue`] when a collaborator or the configured
    /// lifetime fails.
    pub async fn authenticate(
        &self,
        email: &str,
        secret: &str,
    ) -> TokenServiceResult<IssuedToken> {
        let Ok(email) = EmailAddress::new(email) else {
            warn!("authentication rejected: malformed email");
            return Err(TokenServiceError::AuthenticationFailed);
        };
        let user = self.users.find_by_email(&email).await?;
        let Some(user) = user.filter(|user| self.verifier.verify_secret(secret, user.credential()))
        else {
            warn!(%email, "authentication rejected");
            return Err(TokenServiceError::AuthenticationFailed);
        };

        let claims = TokenClaims::issue(user.email().clone(), user.role(), self.ttl, &*self.clock)
            .map_err(TokenServiceError::Issue)?;
        let token = self.signer.sign(&claims)?;
        info!(
            user_id = %user.id(),
            role = %user.role(),
            expires_at = %claims.expires_at(),
            "token issued"
        );
        Ok(IssuedToken {
            token,
            user_id: user.id(),
            email: user.email().clone(),
            role: user.role(),
            expires_at: claims.expires_at(),
        })
    }

    /// Decodes a token into the caller's identity and role snapshot.
    ///
    /// Performs no I/O: the result depends only on the token, the signing
    /// secret, and the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TokenServiceError::TokenExpired`] once the expiry instant
    /// has passed and [`TokenServiceError::TokenMalformed`] for anything that
    /// fails decoding or signature checks.
    pub fn verify(&self, token: &AccessToken) -> TokenServiceResult<Caller> {
        let claims = self.signer.verify(token).inspect_err(|err| {
            debug!(error = %err, "token rejected by signer");
        })?;
        claims.check_window(self.clock.utc()).inspect_err(|err| {
            debug!(subject = %claims.subject(), error = %err, "token outside validity window");
        })?;
        Ok(Caller::from(claims))
    }
}
