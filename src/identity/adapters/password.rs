//! Argon2id credential encoding and verification.
//!
//! Stored credentials are PHC strings (`$argon2id$v=19$...`) carrying their
//! own parameters and salt, so verification needs nothing but the string.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use uuid::Uuid;

use crate::identity::{
    domain::{IdentityDomainError, PasswordCredential},
    ports::CredentialVerifier,
};

/// Credential verifier backed by Argon2id with the crate's default cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialVerifier;

impl Argon2CredentialVerifier {
    /// Creates a verifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Hashes a plain secret with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyCredential`] for an empty secret and
    /// [`IdentityDomainError::CredentialHashing`] when Argon2 rejects the input.
    pub fn encode(&self, plain: &str) -> Result<PasswordCredential, IdentityDomainError> {
        self.encode_with_salt(plain, Uuid::new_v4().as_bytes())
    }

    /// Hashes a plain secret with the given raw salt bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyCredential`] for an empty secret and
    /// [`IdentityDomainError::CredentialHashing`] when the salt is too short or
    /// hashing fails.
    pub fn encode_with_salt(
        &self,
        plain: &str,
        salt: &[u8],
    ) -> Result<PasswordCredential, IdentityDomainError> {
        if plain.is_empty() {
            return Err(IdentityDomainError::EmptyCredential);
        }
        let salt = SaltString::encode_b64(salt)
            .map_err(|err| IdentityDomainError::CredentialHashing(err.to_string()))?;
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|err| IdentityDomainError::CredentialHashing(err.to_string()))?;
        PasswordCredential::new(hash.to_string())
    }
}

impl CredentialVerifier for Argon2CredentialVerifier {
    fn verify_secret(&self, plain: &str, stored: &PasswordCredential) -> bool {
        let Ok(parsed) = PasswordHash::new(stored.expose()) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }
}
