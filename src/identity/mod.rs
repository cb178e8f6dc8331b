//! Accounts, credentials, and identity tokens.
//!
//! This module holds the credential store contract, the token service that
//! turns verified credentials into signed stateless tokens, and the user
//! directory. It follows the same hexagonal layout as the task context:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
