//! `PostgreSQL` connection pool construction.

use crate::config::DatabaseConfig;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::time::Duration;

/// Shared r2d2 pool of Diesel `PostgreSQL` connections.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from database settings.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot establish its initial
/// connections within the configured timeout.
pub fn build_pool(config: &DatabaseConfig) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
        .build(manager)?;
    tracing::info!(
        max_connections = config.max_connections,
        "postgres connection pool ready"
    );
    Ok(pool)
}
