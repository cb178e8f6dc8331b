//! Adapter implementations for identity ports.

pub mod jwt;
pub mod memory;
pub mod password;

pub use jwt::JwtTokenSigner;
pub use password::Argon2CredentialVerifier;
