/// Database access layer
///
/// Free-function repositories over sqlx/Postgres. Mutations that must stay
/// correct under concurrent requests (like/unlike, child-list appends) are
/// single atomic UPDATE statements; no repository does a read-modify-write
/// cycle on an entity.
pub mod comment_repo;
pub mod post_repo;
pub mod user_repo;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{AppError, Result};

/// Create the Postgres connection pool
pub async fn create_pool(config: &DatabaseConfig) -> sqlx::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_millis(config.statement_timeout_ms))
        .connect(&config.url)
        .await
}

/// Bound a storage call with the configured timeout. No operation may block
/// indefinitely; on expiry the call fails as a transient storage error.
pub async fn with_timeout<T, F>(limit: Duration, op: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = sqlx::Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => {
            tracing::warn!(
                op,
                timeout_ms = limit.as_millis() as u64,
                "storage call timed out"
            );
            Err(AppError::StorageTimeout)
        }
    }
}
