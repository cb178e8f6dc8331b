//! Application services for authentication and account management.

mod directory;
mod token;

pub use directory::{UserDirectoryError, UserDirectoryResult, UserDirectoryService, UserRequest};
pub use token::{IssuedToken, TokenService, TokenServiceError, TokenServiceResult};
