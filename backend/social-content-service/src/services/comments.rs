/// Comment service - comments on posts and replies to comments
///
/// Create-then-attach runs inside one transaction: if the parent does not
/// exist the insert rolls back, so no orphaned comment is ever persisted.
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use crate::db::{self, comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{keyed_by_id, Comment};

pub struct CommentService {
    pool: PgPool,
    timeout: Duration,
}

impl CommentService {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Create a comment and append it to a post's comment list
    pub async fn comment_on_post(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(AppError::Validation);
        }

        let pool = self.pool.clone();
        let created = db::with_timeout(self.timeout, "comments.comment_on_post", async move {
            let mut tx = pool.begin().await?;
            let comment =
                comment_repo::create_comment(&mut *tx, Uuid::new_v4(), author_id, content).await?;
            if !post_repo::attach_comment(&mut *tx, post_id, comment.id).await? {
                tx.rollback().await?;
                return Ok(None);
            }
            tx.commit().await?;
            Ok(Some(comment))
        })
        .await?;

        created.ok_or(AppError::NotFound("Post"))
    }

    /// Create a reply and append it to a comment's reply list
    pub async fn reply_to_comment(
        &self,
        comment_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(AppError::Validation);
        }

        let pool = self.pool.clone();
        let created = db::with_timeout(self.timeout, "comments.reply_to_comment", async move {
            let mut tx = pool.begin().await?;
            let reply =
                comment_repo::create_comment(&mut *tx, Uuid::new_v4(), author_id, content).await?;
            if !comment_repo::attach_reply(&mut *tx, comment_id, reply.id).await? {
                tx.rollback().await?;
                return Ok(None);
            }
            tx.commit().await?;
            Ok(Some(reply))
        })
        .await?;

        created.ok_or(AppError::NotFound("Comment"))
    }

    /// Bulk fetch keyed by comment id
    pub async fn by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Comment>> {
        let comments = db::with_timeout(
            self.timeout,
            "comments.find_by_ids",
            comment_repo::find_by_ids(&self.pool, ids),
        )
        .await?;

        Ok(keyed_by_id(comments, |comment| comment.id))
    }
}
