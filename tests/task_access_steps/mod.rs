//! Step definitions for role-based task access scenarios.

mod then;
pub mod world;
