//! Role capability table and access-control rules.
//!
//! Every function is pure: the result depends only on the arguments.
//! Ownership is expressed by the caller's resolved [`UserId`] and the task's
//! assignee, both read from current store state by the calling service.

use super::DenialReason;
use crate::identity::domain::{Role, UserId};
use std::fmt;

/// Capabilities a role can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Create, edit, reassign, delete, and list all tasks.
    ManageTasks,
    /// Read any single task.
    ReadAnyTask,
    /// Read a task assigned to the caller.
    ReadOwnTask,
    /// Complete a task assigned to the caller.
    CompleteOwnTask,
    /// List the tasks assigned to a given employee.
    ListEmployeeTasks,
    /// Create, update, delete, read, and list user accounts.
    ManageUsers,
}

impl Action {
    /// Returns a stable label for logs and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageTasks => "manage_tasks",
            Self::ReadAnyTask => "read_any_task",
            Self::ReadOwnTask => "read_own_task",
            Self::CompleteOwnTask => "complete_own_task",
            Self::ListEmployeeTasks => "list_employee_tasks",
            Self::ManageUsers => "manage_users",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ADMIN_CAPABILITIES: &[Action] = &[
    Action::ManageTasks,
    Action::ReadAnyTask,
    Action::ListEmployeeTasks,
    Action::ManageUsers,
];

const MANAGER_CAPABILITIES: &[Action] = &[
    Action::ManageTasks,
    Action::ReadAnyTask,
    Action::ListEmployeeTasks,
];

// Listing an employee's tasks is open to every authenticated role.
const EMPLOYEE_CAPABILITIES: &[Action] = &[
    Action::ReadOwnTask,
    Action::CompleteOwnTask,
    Action::ListEmployeeTasks,
];

/// Returns the capability set granted to `role`.
#[must_use]
pub const fn capabilities(role: Role) -> &'static [Action] {
    match role {
        Role::Admin => ADMIN_CAPABILITIES,
        Role::Manager => MANAGER_CAPABILITIES,
        Role::Employee => EMPLOYEE_CAPABILITIES,
    }
}

/// Reports whether `role` holds `action`.
#[must_use]
pub fn permits(role: Role, action: Action) -> bool {
    capabilities(role).contains(&action)
}

/// True iff the role may create, edit, delete, and list tasks.
#[must_use]
pub fn can_manage_tasks(role: Role) -> bool {
    permits(role, Action::ManageTasks)
}

/// True for task managers, or for the employee the task is assigned to.
#[must_use]
pub fn can_read_task(role: Role, caller: UserId, assigned_to: UserId) -> bool {
    permits(role, Action::ReadAnyTask)
        || (permits(role, Action::ReadOwnTask) && caller == assigned_to)
}

/// True iff the caller is an employee and the current assignee.
///
/// Admins and managers never complete tasks.
#[must_use]
pub fn can_complete_task(role: Role, caller: UserId, assigned_to: UserId) -> bool {
    permits(role, Action::CompleteOwnTask) && caller == assigned_to
}

/// True iff the role may list tasks of an arbitrary employee.
#[must_use]
pub fn can_list_employee_tasks(role: Role) -> bool {
    permits(role, Action::ListEmployeeTasks)
}

/// True iff the role may manage the user directory.
#[must_use]
pub fn can_manage_users(role: Role) -> bool {
    permits(role, Action::ManageUsers)
}

/// True iff a user with `assignee_role` may be assigned tasks.
#[must_use]
pub const fn validate_assignee_is_employee(assignee_role: Role) -> bool {
    matches!(assignee_role, Role::Employee)
}

/// True when the request must be rejected because it asks for an admin
/// account outside self-registration.
#[must_use]
pub const fn reject_admin_elevation(requested_role: Role) -> bool {
    matches!(requested_role, Role::Admin)
}

/// Requires the task-management capability.
///
/// # Errors
///
/// Returns [`DenialReason::InsufficientRole`] otherwise.
pub fn require_manage_tasks(role: Role) -> Result<(), DenialReason> {
    require_action(role, Action::ManageTasks)
}

/// Requires read access to a task.
///
/// # Errors
///
/// Returns [`DenialReason::NotYourTask`] when the role could read its own
/// tasks but this one is assigned elsewhere, and
/// [`DenialReason::InsufficientRole`] when the role cannot read tasks at all.
pub fn require_read_task(
    role: Role,
    caller: UserId,
    assigned_to: UserId,
) -> Result<(), DenialReason> {
    if can_read_task(role, caller, assigned_to) {
        return Ok(());
    }
    if permits(role, Action::ReadOwnTask) {
        return Err(DenialReason::NotYourTask);
    }
    Err(DenialReason::InsufficientRole {
        role,
        action: Action::ReadAnyTask,
    })
}

/// Requires the right to complete a task.
///
/// # Errors
///
/// Returns [`DenialReason::InsufficientRole`] for roles that never complete
/// tasks and [`DenialReason::NotYourTask`] for an employee who is not the
/// current assignee.
pub fn require_complete_task(
    role: Role,
    caller: UserId,
    assigned_to: UserId,
) -> Result<(), DenialReason> {
    require_action(role, Action::CompleteOwnTask)?;
    if caller != assigned_to {
        return Err(DenialReason::NotYourTask);
    }
    Ok(())
}

/// Requires the right to list an employee's tasks.
///
/// # Errors
///
/// Returns [`DenialReason::InsufficientRole`] otherwise.
pub fn require_list_employee_tasks(role: Role) -> Result<(), DenialReason> {
    require_action(role, Action::ListEmployeeTasks)
}

/// Requires the user-directory capability.
///
/// # Errors
///
/// Returns [`DenialReason::InsufficientRole`] otherwise.
pub fn require_manage_users(role: Role) -> Result<(), DenialReason> {
    require_action(role, Action::ManageUsers)
}

/// Requires the prospective assignee to be an employee.
///
/// # Errors
///
/// Returns [`DenialReason::NotAnEmployeeTarget`] otherwise.
pub const fn require_employee_assignee(assignee_role: Role) -> Result<(), DenialReason> {
    if validate_assignee_is_employee(assignee_role) {
        Ok(())
    } else {
        Err(DenialReason::NotAnEmployeeTarget(assignee_role))
    }
}

/// Forbids requesting the admin role through user management.
///
/// # Errors
///
/// Returns [`DenialReason::AdminElevationForbidden`] for [`Role::Admin`].
pub const fn forbid_admin_elevation(requested_role: Role) -> Result<(), DenialReason> {
    if reject_admin_elevation(requested_role) {
        Err(DenialReason::AdminElevationForbidden)
    } else {
        Ok(())
    }
}

fn require_action(role: Role, action: Action) -> Result<(), DenialReason> {
    if permits(role, action) {
        Ok(())
    } else {
        Err(DenialReason::InsufficientRole { role, action })
    }
}
