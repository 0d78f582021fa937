use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{User, UserProfile};

/// Insert a new user. The unique constraint on email is the source of truth
/// for duplicate detection; a violation surfaces as a unique-violation error.
pub async fn create_user(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, password_hash, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Look up a user by email (full row, for credential checks)
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Look up a user by id, projected without the credential hash
pub async fn find_profile_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<UserProfile>, sqlx::Error> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, name, email, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Bulk lookup by id set, projected without the credential hash. Ids that do
/// not resolve are simply absent from the result.
pub async fn find_profiles_by_ids(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<UserProfile>, sqlx::Error> {
    let profiles = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, name, email, created_at
        FROM users
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}
