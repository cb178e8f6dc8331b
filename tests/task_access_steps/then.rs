//! Then steps for task access BDD scenarios.

use super::world::TaskAccessWorld;
use eyre::eyre;
use rstest_bdd_macros::then;
use taskgate::identity::domain::Role;

#[then("the operation succeeds")]
fn operation_succeeds(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    match world.outcome {
        Some(Ok(())) => Ok(()),
        Some(Err(kind)) => Err(eyre!("expected success, got {kind}")),
        None => Err(eyre!("no operation was attempted")),
    }
}

#[then(r#"the operation fails with "{kind}""#)]
fn operation_fails_with(world: &TaskAccessWorld, kind: String) -> Result<(), eyre::Report> {
    match world.outcome {
        Some(Err(actual)) if actual.as_str() == kind => Ok(()),
        Some(Err(actual)) => Err(eyre!("expected {kind}, got {actual}")),
        Some(Ok(())) => Err(eyre!("expected {kind}, but the operation succeeded")),
        None => Err(eyre!("no operation was attempted")),
    }
}

#[then("the deleted task snapshot is completed")]
fn deleted_snapshot_completed(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let deleted = world
        .deleted_task
        .as_ref()
        .ok_or_else(|| eyre!("missing deleted task snapshot"))?;
    if !deleted.is_completed() {
        return Err(eyre!("deleted snapshot should be completed"));
    }
    Ok(())
}

#[then(r#"the account "{email}" has role "{role}""#)]
fn account_has_role(
    world: &TaskAccessWorld,
    email: String,
    role: String,
) -> Result<(), eyre::Report> {
    let expected =
        Role::try_from(role.as_str()).map_err(|err| eyre!("invalid expected role: {err}"))?;
    let account = world.account(&email)?;
    if account.role() != expected {
        return Err(eyre!(
            "expected {email} to be {expected}, found {}",
            account.role()
        ));
    }
    Ok(())
}
