//! In-memory integration tests for the task board of registered users.

use super::helpers::{Accounts, Workspace, accounts, register, workspace};
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use taskboard::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
    views::TaskStats,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn users_only_see_their_own_board(
    accounts: Accounts,
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Workspace { tasks, .. } = workspace;
    let mina = register(&accounts, "mina@example.org").await?.id().as_owner();
    let omar = register(&accounts, "omar@example.org").await?.id().as_owner();

    let private = tasks
        .create(mina, CreateTaskRequest::new("Draft budget"))
        .await?;
    tasks
        .create(omar, CreateTaskRequest::new("Fix bike"))
        .await?;

    let omar_board = tasks.kanban(omar).await?;
    eyre::ensure!(omar_board.len() == 1, "omar should see one card");
    let peek = tasks.get(omar, private.id()).await;
    eyre::ensure!(
        matches!(peek, Err(TaskLifecycleError::NotFound(_))),
        "cross-owner lookup should be NotFound, got {peek:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moves_across_the_board(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Workspace { tasks, clock } = workspace;
    let owner = taskboard::account::domain::UserId::new().as_owner();
    let task = tasks
        .create(owner, CreateTaskRequest::new("Prepare slides"))
        .await?;

    tasks
        .update_status(owner, task.id(), "in_progress")
        .await?;
    clock.advance(TimeDelta::hours(3));
    let done = tasks
        .update(
            owner,
            task.id(),
            UpdateTaskRequest::new()
                .with_status("done")
                .with_description("Shared with the team"),
        )
        .await?;

    eyre::ensure!(
        done.completed_at() == Some(clock.utc()),
        "completion should be stamped when entering done"
    );
    let board = tasks.kanban(owner).await?;
    eyre::ensure!(
        board.column(TaskStatus::Done).len() == 1 && board.todo.is_empty(),
        "task should sit in the done column"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deadlines_drive_overdue_and_stats(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Workspace { tasks, clock } = workspace;
    let owner = taskboard::account::domain::UserId::new().as_owner();
    let tomorrow = clock.utc() + TimeDelta::days(1);

    let late = tasks
        .create(
            owner,
            CreateTaskRequest::new("Renew insurance")
                .with_priority("high")
                .with_due_date(tomorrow),
        )
        .await?;
    let finished = tasks
        .create(owner, CreateTaskRequest::new("File taxes").with_due_date(tomorrow))
        .await?;
    tasks
        .create(owner, CreateTaskRequest::new("Read novel").with_priority("low"))
        .await?;
    tasks.update_status(owner, finished.id(), "done").await?;

    clock.advance(TimeDelta::days(2));

    let overdue = tasks.overdue(owner).await?;
    eyre::ensure!(
        overdue.iter().map(|task| task.id()).eq([late.id()]),
        "only the open task past its deadline is overdue"
    );
    let stats = tasks.stats(owner).await?;
    eyre::ensure!(
        stats
            == TaskStats {
                total: 3,
                todo: 2,
                in_progress: 0,
                done: 1,
                high_priority: 1,
                overdue: 1,
            },
        "unexpected stats {stats:?}"
    );
    let view = tasks.view(&late);
    eyre::ensure!(
        view.is_overdue && view.days_until_due == Some(-1),
        "view should report one day overdue, got {view:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn past_due_date_is_rejected_on_create(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Workspace { tasks, clock } = workspace;
    let owner = taskboard::account::domain::UserId::new().as_owner();

    let result = tasks
        .create(
            owner,
            CreateTaskRequest::new("Too late").with_due_date(clock.utc() - TimeDelta::days(1)),
        )
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("past due date accepted"))?;
    eyre::ensure!(err.is_validation(), "expected validation error, got {err:?}");
    eyre::ensure!(
        tasks.kanban(owner).await?.is_empty(),
        "rejected task must not be stored"
    );
    Ok(())
}
