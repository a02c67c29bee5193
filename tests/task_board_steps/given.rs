//! Given steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use chrono::TimeDelta;
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::given;
use taskboard::task::services::CreateTaskRequest;

#[given(r#"a registered user "{email}""#)]
fn registered_user(world: &mut TaskBoardWorld, email: String) -> Result<(), eyre::Report> {
    let owner = world.register(&email).wrap_err("register scenario user")?;
    world.owner = Some(owner);
    Ok(())
}

#[given(r#"a task titled "{title}""#)]
fn task_titled(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let created = run_async(world.tasks.create(owner, CreateTaskRequest::new(title)))
        .wrap_err("create task for scenario")?;
    world.last_task = Some(created);
    Ok(())
}

#[given(r#"a task titled "{title}" due in {days:i64} days"#)]
fn task_titled_due_in(
    world: &mut TaskBoardWorld,
    title: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let due = world.clock.utc() + TimeDelta::days(days);
    let request = CreateTaskRequest::new(title).with_due_date(due);
    let created = run_async(world.tasks.create(owner, request))
        .wrap_err("create task with due date for scenario")?;
    world.last_task = Some(created);
    Ok(())
}
