//! Domain model for task lifecycle management.
//!
//! A task is assigned to one employee and moves from open to completed
//! exactly once. Access control is not part of the domain; services consult
//! the authorization engine before touching a task.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use task::{Task, TaskDetails, TaskState};
