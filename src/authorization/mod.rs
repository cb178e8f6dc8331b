//! Authorization engine.
//!
//! The single place access-control rules live. Services resolve ownership
//! data from current store state and ask the engine for a decision before
//! every read or mutation; the engine holds no state of its own.
//!
//! - Capability table and rules in [`engine`]
//! - Denial reasons in [`DenialReason`]
//! - Verified caller snapshot in [`Caller`]

mod caller;
mod denial;
pub mod engine;

pub use caller::Caller;
pub use denial::DenialReason;
pub use engine::{
    Action, can_complete_task, can_list_employee_tasks, can_manage_tasks, can_manage_users,
    can_read_task, capabilities, permits, reject_admin_elevation, validate_assignee_is_employee,
};
