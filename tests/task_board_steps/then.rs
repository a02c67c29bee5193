//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::task::services::TaskLifecycleError;

#[then("the task has a completion time")]
fn task_has_completion_time(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let task = world.last_task()?;
    eyre::ensure!(
        task.completed_at().is_some(),
        "expected a completion time on {}",
        task.title()
    );
    Ok(())
}

#[then("the task has no completion time")]
fn task_has_no_completion_time(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let task = world.last_task()?;
    eyre::ensure!(
        task.completed_at().is_none(),
        "expected no completion time, found {:?}",
        task.completed_at()
    );
    Ok(())
}

#[then("{count:usize} task is overdue")]
fn tasks_overdue(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    let overdue = run_async(world.tasks.overdue(world.owner()?))?;
    eyre::ensure!(
        overdue.len() == count,
        "expected {count} overdue, found {}",
        overdue.len()
    );
    Ok(())
}

#[then("the stats report {total:usize} total and {overdue:usize} overdue")]
fn stats_report(world: &TaskBoardWorld, total: usize, overdue: usize) -> Result<(), eyre::Report> {
    let stats = run_async(world.tasks.stats(world.owner()?))?;
    eyre::ensure!(
        stats.total == total && stats.overdue == overdue,
        "unexpected stats {stats:?}"
    );
    Ok(())
}

#[then("the move fails with an invalid status error")]
fn move_fails_with_invalid_status(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    eyre::ensure!(
        matches!(result, Err(TaskLifecycleError::InvalidStatus(_))),
        "expected InvalidStatus error, got {result:?}"
    );
    Ok(())
}

#[then("the lookup fails with a not found error")]
fn lookup_fails_with_not_found(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing lookup result"))?;
    eyre::ensure!(
        matches!(result, Err(TaskLifecycleError::NotFound(_))),
        "expected NotFound error, got {result:?}"
    );
    Ok(())
}
