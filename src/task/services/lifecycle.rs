//! Service layer for task creation, editing, completion, and retrieval.
//!
//! Every operation asks the authorization engine for a decision first and
//! reads ownership data (the caller's account, the task's assignee, the
//! prospective assignee's role) from the stores on each call.

use crate::authorization::{
    Caller, DenialReason,
    engine::{
        require_complete_task, require_employee_assignee, require_list_employee_tasks,
        require_manage_tasks, require_read_task,
    },
};
use crate::error::{Created, ErrorKind};
use crate::identity::{
    domain::{EmailAddress, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::task::{
    domain::{Task, TaskDetails, TaskDomainError, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating or editing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    title: String,
    description: String,
    end_date: DateTime<Utc>,
    assigned_to: UserId,
}

impl TaskRequest {
    /// Creates a request with required task fields and an empty description.
    #[must_use]
    pub fn new(title: impl Into<String>, end_date: DateTime<Utc>, assigned_to: UserId) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            end_date,
            assigned_to,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the requested assignee.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        Ok(TaskDetails {
            title: TaskTitle::new(self.title)?,
            description: self.description,
            end_date: self.end_date,
            assigned_to: self.assigned_to,
        })
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The authorization engine refused the request.
    #[error("request denied: {0}")]
    Denied(DenialReason),

    /// Domain validation or state transition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced assignee does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The verified caller no longer has an account.
    #[error("caller account no longer exists: {0}")]
    UnknownCaller(EmailAddress),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// User repository operation failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
}

impl TaskLifecycleError {
    /// Returns the failure kind a boundary layer should report.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Denied(reason) => reason.kind(),
            Self::Domain(TaskDomainError::EmptyTitle) => ErrorKind::ValidationFailed,
            Self::Domain(
                TaskDomainError::AlreadyCompleted(_)
                | TaskDomainError::InvalidStateTransition { .. },
            ) => ErrorKind::Conflict,
            Self::TaskNotFound(_) | Self::UserNotFound(_) => ErrorKind::EntityNotFound,
            Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::EntityNotFound,
            Self::UnknownCaller(_) => ErrorKind::AuthenticationFailed,
            Self::Repository(_) | Self::UserRepository(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<R, U, C> TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            repository,
            users,
            clock,
        }
    }

    /// Creates an open task assigned to an employee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Denied`] when the caller cannot manage
    /// tasks or the assignee is not an employee,
    /// [`TaskLifecycleError::UserNotFound`] for an unknown assignee, and
    /// [`TaskLifecycleError::Domain`] for an empty title.
    pub async fn create_task(
        &self,
        caller: &Caller,
        request: TaskRequest,
    ) -> TaskLifecycleResult<Created<Task>> {
        authorize(caller, "create_task", require_manage_tasks(caller.role()))?;
        let details = request.into_details()?;
        self.ensure_employee_assignee(caller, details.assigned_to)
            .await?;

        let task = Task::new(details, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), assignee = %task.assigned_to(), "task created");
        Ok(Created::new(task))
    }

    /// Replaces a task's editable fields, including its assignee.
    ///
    /// Completion state is preserved. The assignee is re-validated only when
    /// it changes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Denied`] when the caller cannot manage
    /// tasks or a new assignee is not an employee, and
    /// [`TaskLifecycleError::TaskNotFound`] for an unknown task.
    pub async fn edit_task(
        &self,
        caller: &Caller,
        id: TaskId,
        request: TaskRequest,
    ) -> TaskLifecycleResult<Task> {
        authorize(caller, "edit_task", require_manage_tasks(caller.role()))?;
        let details = request.into_details()?;
        let mut task = self.find_or_error(id).await?;
        if details.assigned_to != task.assigned_to() {
            self.ensure_employee_assignee(caller, details.assigned_to)
                .await?;
        }

        task.edit(details, &*self.clock);
        self.repository.update(&task).await?;
        info!(task_id = %task.id(), assignee = %task.assigned_to(), "task edited");
        Ok(task)
    }

    /// Deletes a task and returns its final snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Denied`] when the caller cannot manage
    /// tasks and [`TaskLifecycleError::TaskNotFound`] for an unknown task.
    pub async fn delete_task(&self, caller: &Caller, id: TaskId) -> TaskLifecycleResult<Task> {
        authorize(caller, "delete_task", require_manage_tasks(caller.role()))?;
        let removed = self.repository.delete(id).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskLifecycleError::TaskNotFound(missing),
            other => other.into(),
        })?;
        info!(task_id = %removed.id(), completed = removed.is_completed(), "task deleted");
        Ok(removed)
    }

    /// Marks a task completed on behalf of its assigned employee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for an unknown task,
    /// [`TaskLifecycleError::Denied`] for admins, managers, and employees
    /// who are not the current assignee, and
    /// [`TaskLifecycleError::Domain`] with
    /// [`TaskDomainError::AlreadyCompleted`] when the task is already
    /// completed.
    pub async fn complete_task(&self, caller: &Caller, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_or_error(id).await?;
        let caller_id = self.resolve_caller(caller).await?;
        authorize(
            caller,
            "complete_task",
            require_complete_task(caller.role(), caller_id, task.assigned_to()),
        )?;

        task.complete(&*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %task.id(), assignee = %caller_id, "task completed");
        Ok(task)
    }

    /// Reads a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for an unknown task and
    /// [`TaskLifecycleError::Denied`] for an employee who is not the current
    /// assignee.
    pub async fn get_task(&self, caller: &Caller, id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.find_or_error(id).await?;
        let caller_id = self.resolve_caller(caller).await?;
        authorize(
            caller,
            "get_task",
            require_read_task(caller.role(), caller_id, task.assigned_to()),
        )?;
        Ok(task)
    }

    /// Lists every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Denied`] when the caller cannot manage
    /// tasks.
    pub async fn list_tasks(&self, caller: &Caller) -> TaskLifecycleResult<Vec<Task>> {
        authorize(caller, "list_tasks", require_manage_tasks(caller.role()))?;
        Ok(self.repository.list().await?)
    }

    /// Lists the tasks assigned to an employee.
    ///
    /// Open to every authenticated caller, including other employees.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_tasks_for_employee(
        &self,
        caller: &Caller,
        employee: UserId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        authorize(
            caller,
            "list_tasks_for_employee",
            require_list_employee_tasks(caller.role()),
        )?;
        debug!(caller = %caller.email(), %employee, "listing employee tasks");
        Ok(self.repository.list_by_assignee(employee).await?)
    }

    async fn ensure_employee_assignee(
        &self,
        caller: &Caller,
        assignee: UserId,
    ) -> TaskLifecycleResult<()> {
        let user = self
            .users
            .find_by_id(assignee)
            .await?
            .ok_or(TaskLifecycleError::UserNotFound(assignee))?;
        authorize(caller, "assign_task", require_employee_assignee(user.role()))
    }

    async fn resolve_caller(&self, caller: &Caller) -> TaskLifecycleResult<UserId> {
        self.users
            .find_by_email(caller.email())
            .await?
            .map(|user| user.id())
            .ok_or_else(|| TaskLifecycleError::UnknownCaller(caller.email().clone()))
    }

    async fn find_or_error(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(id))
    }
}

fn authorize(
    caller: &Caller,
    operation: &'static str,
    decision: Result<(), DenialReason>,
) -> TaskLifecycleResult<()> {
    decision.map_err(|reason| {
        warn!(
            operation,
            caller = %caller.email(),
            role = %caller.role(),
            %reason,
            "task request denied"
        );
        TaskLifecycleError::Denied(reason)
    })
}
