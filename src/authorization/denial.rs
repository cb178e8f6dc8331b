//! Named causes for refused actions.

use super::Action;
use crate::error::ErrorKind;
use crate::identity::domain::Role;
use thiserror::Error;

/// Why the authorization engine refused an action.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DenialReason {
    /// The caller's role does not hold the capability.
    #[error("role {role} may not perform {action}")]
    InsufficientRole {
        /// Role of the caller.
        role: Role,
        /// Capability that was required.
        action: Action,
    },

    /// The task is not assigned to the calling employee.
    #[error("task is not assigned to the caller")]
    NotYourTask,

    /// The prospective assignee is not an employee.
    #[error("task should be assigned to a user with role EMPLOYEE but was {0}")]
    NotAnEmployeeTarget(Role),

    /// Admin accounts may only be created by self-registration.
    #[error("admin accounts cannot be created through user management")]
    AdminElevationForbidden,
}

impl DenialReason {
    /// Returns the failure kind a boundary layer should report.
    ///
    /// Role and ownership refusals are authorization denials; rules on the
    /// target of an operation (assignee role, requested role) are validation
    /// failures.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::InsufficientRole { .. } | Self::NotYourTask => ErrorKind::AuthorizationDenied,
            Self::NotAnEmployeeTarget(_) | Self::AdminElevationForbidden => {
                ErrorKind::ValidationFailed
            }
        }
    }

    /// Returns the offending input field for validation-style denials.
    #[must_use]
    pub const fn field(self) -> Option<&'static str> {
        match self {
            Self::NotAnEmployeeTarget(_) => Some("assigned_to"),
            Self::AdminElevationForbidden => Some("role"),
            Self::InsufficientRole { .. } | Self::NotYourTask => None,
        }
    }
}
