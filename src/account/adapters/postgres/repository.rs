//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{UserProfileChangeset, UserRow},
    schema::users,
};
use crate::account::{
    domain::{EmailAddress, PersistedUserData, PersonName, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use crate::db::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let email = user.email().clone();
        let row = to_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| insert_error(err, &email))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let changeset = UserProfileChangeset {
            first_name: user.first_name().as_str().to_owned(),
            last_name: user.last_name().as_str().to_owned(),
            updated_at: user.updated_at(),
        };

        self.run_blocking(move |connection| {
            let affected = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if affected == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

/// Maps an insert failure; the unique email index reports a taken address.
fn insert_error(err: DieselError, email: &EmailAddress) -> UserRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::DuplicateEmail(email.clone())
        }
        _ => UserRepositoryError::persistence(err),
    }
}

fn to_row(user: &User) -> UserRow {
    UserRow {
        id: user.id().into_inner(),
        email: user.email().as_str().to_owned(),
        first_name: user.first_name().as_str().to_owned(),
        last_name: user.last_name().as_str().to_owned(),
        password_hash: user.password_hash().to_owned(),
        date_joined: user.date_joined(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let email = EmailAddress::new(row.email).map_err(UserRepositoryError::persistence)?;
    let first_name =
        PersonName::new("first_name", row.first_name).map_err(UserRepositoryError::persistence)?;
    let last_name =
        PersonName::new("last_name", row.last_name).map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        email,
        first_name,
        last_name,
        password_hash: row.password_hash,
        date_joined: row.date_joined,
        updated_at: row.updated_at,
    }))
}
