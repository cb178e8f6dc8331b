//! In-memory integration tests for end-to-end task lifecycle flows.

use super::helpers::{Platform, deadline, platform, staff};
use chrono::TimeDelta;
use rstest::rstest;
use taskgate::error::ErrorKind;
use taskgate::identity::domain::Role;
use taskgate::task::{domain::TaskState, services::TaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_to_deletion_flow(platform: Platform) -> eyre::Result<()> {
    let root = platform.register_admin("root@example.com", "root-pass").await?;
    assert_eq!(root.role(), Role::Admin);
    let admin = platform.login("root@example.com", "root-pass").await?;

    let manager = platform
        .create_user(&admin, "boss@example.com", "boss-pass", Role::Manager)
        .await?;
    let employee = platform
        .create_user(&admin, "worker@example.com", "worker-pass", Role::Employee)
        .await?;
    assert_eq!(manager.role(), Role::Manager);
    assert_eq!(employee.role(), Role::Employee);

    let manager_caller = platform.login("boss@example.com", "boss-pass").await?;
    let task = platform
        .tasks
        .create_task(
            &manager_caller,
            TaskRequest::new("Quarterly close", deadline(), employee.id()),
        )
        .await?
        .into_inner();
    assert!(!task.is_completed());

    let employee_caller = platform.login("worker@example.com", "worker-pass").await?;
    let completed = platform
        .tasks
        .complete_task(&employee_caller, task.id())
        .await?;
    assert!(completed.is_completed());

    let deleted = platform.tasks.delete_task(&admin, task.id()).await?;
    assert!(deleted.is_completed());
    assert_eq!(deleted.id(), task.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_reads_back_unchanged(platform: Platform) -> eyre::Result<()> {
    let staff = staff(&platform).await?;
    let created = platform
        .tasks
        .create_task(
            &staff.manager,
            TaskRequest::new("Vendor review", deadline(), staff.employee.id())
                .with_description("Check renewal terms"),
        )
        .await?
        .into_inner();

    let as_manager = platform.tasks.get_task(&staff.manager, created.id()).await?;
    let as_admin = platform.tasks.get_task(&staff.admin, created.id()).await?;
    let as_assignee = platform
        .tasks
        .get_task(&staff.employee_caller, created.id())
        .await?;

    assert_eq!(as_manager, created);
    assert_eq!(as_admin, created);
    assert_eq!(as_assignee, created);
    assert_eq!(created.description(), "Check renewal terms");
    assert_eq!(created.end_date(), deadline());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_is_monotonic(platform: Platform) -> eyre::Result<()> {
    let staff = staff(&platform).await?;
    let task = platform
        .tasks
        .create_task(
            &staff.manager,
            TaskRequest::new("Archive files", deadline(), staff.employee.id()),
        )
        .await?
        .into_inner();
    platform.clock.advance(TimeDelta::minutes(10));
    let completed = platform
        .tasks
        .complete_task(&staff.employee_caller, task.id())
        .await?;

    platform.clock.advance(TimeDelta::minutes(10));
    let edited = platform
        .tasks
        .edit_task(
            &staff.manager,
            task.id(),
            TaskRequest::new("Archive old files", deadline(), staff.colleague.id()),
        )
        .await?;
    let again = platform
        .tasks
        .complete_task(&staff.colleague_caller, task.id())
        .await
        .expect_err("completed task cannot be completed again");

    assert_eq!(edited.state(), TaskState::Completed);
    assert_eq!(edited.completed_at(), completed.completed_at());
    assert!(edited.updated_at() > completed.updated_at());
    assert_eq!(again.kind(), ErrorKind::Conflict);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employee_listing_is_open_to_any_caller(platform: Platform) -> eyre::Result<()> {
    let staff = staff(&platform).await?;
    let first = platform
        .tasks
        .create_task(
            &staff.manager,
            TaskRequest::new("First", deadline(), staff.employee.id()),
        )
        .await?
        .into_inner();
    platform.clock.advance(TimeDelta::seconds(1));
    let second = platform
        .tasks
        .create_task(
            &staff.admin,
            TaskRequest::new("Second", deadline(), staff.employee.id()),
        )
        .await?
        .into_inner();
    platform
        .tasks
        .create_task(
            &staff.manager,
            TaskRequest::new("Elsewhere", deadline(), staff.colleague.id()),
        )
        .await?;

    let seen_by_colleague = platform
        .tasks
        .list_tasks_for_employee(&staff.colleague_caller, staff.employee.id())
        .await?;
    let everything = platform.tasks.list_tasks(&staff.admin).await?;

    assert_eq!(seen_by_colleague, vec![first, second]);
    assert_eq!(everything.len(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_assignee_leaves_task_listed(platform: Platform) -> eyre::Result<()> {
    let staff = staff(&platform).await?;
    let task = platform
        .tasks
        .create_task(
            &staff.manager,
            TaskRequest::new("Orphaned", deadline(), staff.colleague.id()),
        )
        .await?
        .into_inner();
    platform
        .directory
        .delete_user(&staff.admin, staff.colleague.id())
        .await?;

    let listed = platform.tasks.list_tasks(&staff.manager).await?;
    let completion = platform
        .tasks
        .complete_task(&staff.colleague_caller, task.id())
        .await
        .expect_err("deleted account's token no longer resolves");

    assert_eq!(listed, vec![task]);
    assert_eq!(completion.kind(), ErrorKind::AuthenticationFailed);
    Ok(())
}
