//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use chrono::TimeDelta;
use rstest_bdd_macros::when;

#[when(r#"the task is moved to "{status}""#)]
fn move_task(world: &mut TaskBoardWorld, status: String) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let id = world.last_task()?.id();

    let result = run_async(world.tasks.update_status(owner, id, &status));
    if let Ok(ref moved) = result {
        world.last_task = Some(moved.clone());
    }
    world.last_result = Some(result);
    Ok(())
}

#[when("{days:i64} days pass")]
fn days_pass(world: &mut TaskBoardWorld, days: i64) {
    world.clock.advance(TimeDelta::days(days));
}

#[when(r#"another registered user "{email}" looks up the task"#)]
fn other_user_looks_up(world: &mut TaskBoardWorld, email: String) -> Result<(), eyre::Report> {
    let stranger = world.register(&email)?;
    let id = world.last_task()?.id();
    world.last_result = Some(run_async(world.tasks.get(stranger, id)));
    Ok(())
}
