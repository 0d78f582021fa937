use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Post;

/// Insert a new post with empty liker and comment lists
pub async fn create_post(
    pool: &PgPool,
    id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, author_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, seq, author_id, content, created_at, likes, comments
        "#,
    )
    .bind(id)
    .bind(author_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Add a user to a post's liker set.
///
/// One atomic append-if-absent statement: concurrent likes from the same
/// user cannot produce a duplicate entry, and re-liking is a no-op that
/// still returns the post. `None` means the post id did not resolve.
pub async fn add_like(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET likes = CASE
            WHEN likes @> ARRAY[$2]::uuid[] THEN likes
            ELSE array_append(likes, $2)
        END
        WHERE id = $1
        RETURNING id, seq, author_id, content, created_at, likes, comments
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Remove a user from a post's liker set. Removing an absent entry is a
/// no-op; `None` means the post id did not resolve.
pub async fn remove_like(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET likes = array_remove(likes, $2)
        WHERE id = $1
        RETURNING id, seq, author_id, content, created_at, likes, comments
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Append a comment id to a post's comment list. Returns false when the
/// post does not exist. Generic over the executor so the interaction engine
/// can run it inside the same transaction as the comment insert.
pub async fn attach_comment<'e, E>(
    executor: E,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET comments = array_append(comments, $2)
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .bind(comment_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// One page of posts, newest first. `seq` breaks creation-timestamp ties so
/// consecutive pages never skip or repeat a record under concurrent inserts.
pub async fn find_page(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, seq, author_id, content, created_at, likes, comments
        FROM posts
        ORDER BY created_at DESC, seq DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Total number of posts
pub async fn count_posts(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
}

/// Bulk lookup by id set; unresolved ids are absent from the result
pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, seq, author_id, content, created_at, likes, comments
        FROM posts
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
