//! Port contracts for the identity context.
//!
//! Ports define infrastructure-agnostic interfaces used by identity services.

pub mod credentials;
pub mod repository;
pub mod signer;

pub use credentials::CredentialVerifier;
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
pub use signer::{TokenSigner, TokenSignerError};

#[cfg(test)]
pub use credentials::MockCredentialVerifier;
#[cfg(test)]
pub use signer::MockTokenSigner;
