//! Taskgate: role-based access control and task lifecycle engine.
//!
//! This crate authenticates users against stored credentials, issues signed
//! stateless tokens, and enforces a role and ownership permission model over
//! task records.
//!
//! # Architecture
//!
//! Taskgate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory stores, JWT,
//!   credential hashing)
//!
//! # Modules
//!
//! - [`identity`]: Accounts, credential checks, and token issue/verify
//! - [`authorization`]: The permission matrix and denial reasons
//! - [`task`]: Task creation, assignment, completion, and retrieval
//! - [`config`]: Token signing configuration
//! - [`error`]: Boundary error kinds shared by every service

pub mod authorization;
pub mod config;
pub mod error;
pub mod identity;
pub mod task;
