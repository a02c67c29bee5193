//! In-memory integration tests for listing tasks with filters and ordering.

use super::helpers::{Workspace, workspace};
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use taskboard::{
    account::domain::UserId,
    task::{
        domain::{OwnerId, Task, TaskPriority, TaskStatus},
        ports::TaskQuery,
        services::CreateTaskRequest,
    },
};

struct Seeded {
    workspace: Workspace,
    owner: OwnerId,
}

/// Seeds four tasks one hour apart; two carry due dates.
async fn seeded(workspace: Workspace) -> Result<Seeded, eyre::Report> {
    let owner = UserId::new().as_owner();
    let requests = [
        CreateTaskRequest::new("Write tests").with_priority("high"),
        CreateTaskRequest::new("Review pull request")
            .with_description("check the tests too")
            .with_due_date(workspace.clock.utc() + TimeDelta::days(5)),
        CreateTaskRequest::new("Book flights")
            .with_priority("low")
            .with_due_date(workspace.clock.utc() + TimeDelta::days(2)),
        CreateTaskRequest::new("Water plants"),
    ];
    for request in requests {
        workspace.tasks.create(owner, request).await?;
        workspace.clock.advance(TimeDelta::hours(1));
    }
    Ok(Seeded { workspace, owner })
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_listing_is_newest_first(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Seeded { workspace, owner } = seeded(workspace).await?;

    let listed = workspace.tasks.list(owner, &TaskQuery::new()).await?;

    eyre::ensure!(
        titles(&listed)
            == [
                "Water plants",
                "Book flights",
                "Review pull request",
                "Write tests"
            ],
        "unexpected order {:?}",
        titles(&listed)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_covers_title_and_description(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Seeded { workspace, owner } = seeded(workspace).await?;

    let query = TaskQuery::new().with_search("TESTS");
    let listed = workspace.tasks.list(owner, &query).await?;

    eyre::ensure!(
        titles(&listed) == ["Review pull request", "Write tests"],
        "unexpected matches {:?}",
        titles(&listed)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_date_ordering_puts_undated_last(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Seeded { workspace, owner } = seeded(workspace).await?;

    let query = TaskQuery::new().ordered_by("due_date".parse()?);
    let listed = workspace.tasks.list(owner, &query).await?;

    eyre::ensure!(
        titles(&listed)
            == [
                "Book flights",
                "Review pull request",
                "Water plants",
                "Write tests"
            ],
        "unexpected order {:?}",
        titles(&listed)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_combine(workspace: Workspace) -> Result<(), eyre::Report> {
    let Seeded { workspace, owner } = seeded(workspace).await?;
    let everything = workspace.tasks.list(owner, &TaskQuery::new()).await?;
    let flights = everything
        .iter()
        .find(|task| task.title().as_str() == "Book flights")
        .ok_or_else(|| eyre::eyre!("seeded task missing"))?;
    workspace
        .tasks
        .update_status(owner, flights.id(), "in_progress")
        .await?;

    let query = TaskQuery::new()
        .with_status(TaskStatus::InProgress)
        .with_priority(TaskPriority::Low);
    let listed = workspace.tasks.list(owner, &query).await?;

    eyre::ensure!(titles(&listed) == ["Book flights"], "unexpected matches");
    Ok(())
}
