use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Comment;

/// Insert a new comment with an empty reply list. Creation does not attach:
/// a comment only becomes reachable when a parent's child list is appended,
/// which the interaction engine does in the same transaction.
pub async fn create_comment<'e, E>(
    executor: E,
    id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, author_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, author_id, content, created_at, replies
        "#,
    )
    .bind(id)
    .bind(author_id)
    .bind(content)
    .fetch_one(executor)
    .await?;

    Ok(comment)
}

/// Append a reply id to a comment's reply list. Returns false when the
/// parent comment does not exist.
pub async fn attach_reply<'e, E>(
    executor: E,
    comment_id: Uuid,
    reply_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET replies = array_append(replies, $2)
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .bind(reply_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Bulk lookup by id set; unresolved ids are absent from the result
pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, author_id, content, created_at, replies
        FROM comments
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
