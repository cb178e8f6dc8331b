//! HS256 JSON Web Token signer.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TokenConfig;
use crate::identity::{
    domain::{AccessToken, EmailAddress, Role, TokenClaims},
    ports::{TokenSigner, TokenSignerError},
};

/// Claim layout carried inside the JWT payload.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
}

impl From<&TokenClaims> for WireClaims {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            sub: claims.subject().as_str().to_owned(),
            role: claims.role(),
            iat: claims.issued_at().timestamp(),
            exp: claims.expires_at().timestamp(),
        }
    }
}

impl TryFrom<WireClaims> for TokenClaims {
    type Error = TokenSignerError;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        let subject = EmailAddress::new(wire.sub)
            .map_err(|err| TokenSignerError::Malformed(err.to_string()))?;
        let issued_at = timestamp(wire.iat, "iat")?;
        let expires_at = timestamp(wire.exp, "exp")?;
        Ok(Self::from_parts(subject, wire.role, issued_at, expires_at))
    }
}

fn timestamp(seconds: i64, claim: &str) -> Result<DateTime<Utc>, TokenSignerError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| TokenSignerError::Malformed(format!("{claim} out of range: {seconds}")))
}

/// Signs and verifies tokens with a shared HMAC-SHA256 secret.
///
/// Expiry is not validated here; the token service checks the validity
/// window against its injected clock.
#[derive(Clone)]
pub struct JwtTokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenSigner {
    /// Creates a signer from raw secret bytes.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Creates a signer from token configuration.
    #[must_use]
    pub fn from_config(config: &TokenConfig) -> Self {
        Self::new(config.secret().as_bytes())
    }
}

impl fmt::Debug for JwtTokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenSigner")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign(&self, claims: &TokenClaims) -> Result<AccessToken, TokenSignerError> {
        let wire = WireClaims::from(claims);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenSignerError::Signing(err.to_string()))
    }

    fn verify(&self, token: &AccessToken) -> Result<TokenClaims, TokenSignerError> {
        let data =
            jsonwebtoken::decode::<WireClaims>(token.as_str(), &self.decoding, &self.validation)
                .map_err(|err| match err.kind() {
                    JwtErrorKind::InvalidSignature => TokenSignerError::InvalidSignature,
                    _ => TokenSignerError::Malformed(err.to_string()),
                })?;
        TokenClaims::try_from(data.claims)
    }
}
