//! Task lifecycle management.
//!
//! Managers and admins create, edit, reassign, and delete tasks; the assigned
//! employee completes them exactly once. Every operation consults the
//! [`crate::authorization`] engine against current store state. The module
//! follows hexagonal architecture:
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
