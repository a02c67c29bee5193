//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::db::PgPool;
use crate::task::{
    domain::{OwnerId, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, TaskTitle},
    ports::{
        OrderDirection, TaskOrderingField, TaskQuery, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Integer;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = PgPool;

/// Sort key mapping priority labels onto their rank.
const PRIORITY_RANK_SQL: &str =
    "CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 WHEN 'high' THEN 2 END";

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| insert_error(err, task_id))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let owner = task.owner();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, owner: OwnerId, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let list_query = query.clone();
        self.run_blocking(move |connection| {
            let rows = build_list_query(owner, &list_query)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// Translates a [`TaskQuery`] into a boxed Diesel query scoped to `owner`.
fn build_list_query(owner: OwnerId, query: &TaskQuery) -> tasks::BoxedQuery<'static, Pg> {
    let mut statement = tasks::table
        .filter(tasks::owner_id.eq(owner.into_inner()))
        .into_boxed();

    if let Some(status) = query.status() {
        statement = statement.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(priority) = query.priority() {
        statement = statement.filter(tasks::priority.eq(priority.as_str()));
    }

    let (created_after, created_before) = query.created_range();
    if let Some(bound) = created_after {
        statement = statement.filter(tasks::created_at.ge(bound));
    }
    if let Some(bound) = created_before {
        statement = statement.filter(tasks::created_at.le(bound));
    }

    let (due_after, due_before) = query.due_range();
    if let Some(bound) = due_after {
        statement = statement.filter(tasks::due_date.ge(bound));
    }
    if let Some(bound) = due_before {
        statement = statement.filter(tasks::due_date.le(bound));
    }

    if let Some(term) = query.search() {
        let pattern = format!("%{}%", escape_like(term));
        statement = statement.filter(
            tasks::title
                .ilike(pattern.clone())
                .or(tasks::description.ilike(pattern)),
        );
    }

    let ordering = query.ordering();
    let ascending = ordering.direction == OrderDirection::Ascending;
    statement = match (ordering.field, ascending) {
        (TaskOrderingField::CreatedAt, true) => statement.order_by(tasks::created_at.asc()),
        (TaskOrderingField::CreatedAt, false) => statement.order_by(tasks::created_at.desc()),
        (TaskOrderingField::UpdatedAt, true) => statement.order_by(tasks::updated_at.asc()),
        (TaskOrderingField::UpdatedAt, false) => statement.order_by(tasks::updated_at.desc()),
        (TaskOrderingField::DueDate, true) => {
            statement.order_by(tasks::due_date.asc().nulls_last())
        }
        (TaskOrderingField::DueDate, false) => {
            statement.order_by(tasks::due_date.desc().nulls_last())
        }
        (TaskOrderingField::Priority, true) => {
            statement.order_by(sql::<Integer>(PRIORITY_RANK_SQL).asc())
        }
        (TaskOrderingField::Priority, false) => {
            statement.order_by(sql::<Integer>(PRIORITY_RANK_SQL).desc())
        }
    };

    statement
        .then_order_by(tasks::created_at.desc())
        .then_order_by(tasks::id.asc())
}

/// Maps an insert failure, reporting a primary-key clash as a duplicate.
fn insert_error(err: DieselError, task_id: TaskId) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TaskRepositoryError::DuplicateTask(task_id)
        }
        _ => TaskRepositoryError::persistence(err),
    }
}

/// Escapes `LIKE` wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Maps a task aggregate onto an insert row.
pub(crate) fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        due_date: task.due_date(),
        completed_at: task.completed_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        updated_at: task.updated_at(),
        due_date: task.due_date(),
        completed_at: task.completed_at(),
    }
}

/// Rebuilds a task aggregate from a stored row.
pub(crate) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        title: persisted_title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        created_at,
        updated_at,
        due_date,
        completed_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner: OwnerId::from_uuid(owner_id),
        title,
        description,
        status,
        priority,
        created_at,
        updated_at,
        due_date,
        completed_at,
    };
    Ok(Task::from_persisted(data))
}
