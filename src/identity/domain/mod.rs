//! Domain model for accounts and identity tokens.
//!
//! Users are keyed by a unique email address and carry one fixed role. Tokens
//! are stateless claim sets; nothing here performs I/O.

mod error;
mod ids;
mod role;
mod token;
mod user;

pub use error::{IdentityDomainError, ParseRoleError, TokenWindowError};
pub use ids::{EmailAddress, UserId};
pub use role::Role;
pub use token::{AccessToken, TokenClaims};
pub use user::{PasswordCredential, User, UserDetails};
