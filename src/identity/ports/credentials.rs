//! Credential verifier port.

use crate::identity::domain::PasswordCredential;

/// Compares a presented secret with a stored credential.
///
/// The hashing scheme belongs to the implementation.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    /// Returns `true` when `plain` matches `stored`.
    fn verify_secret(&self, plain: &str, stored: &PasswordCredential) -> bool;
}
