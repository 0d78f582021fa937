/// Post service - creation, likes, and paginated listing
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use crate::db::{self, post_repo};
use crate::error::{AppError, Result};
use crate::models::{keyed_by_id, Pagination, Post};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

pub struct PostService {
    pool: PgPool,
    timeout: Duration,
}

impl PostService {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Create a new post with empty liker and comment lists
    pub async fn create(&self, author_id: Uuid, content: &str) -> Result<Post> {
        if content.trim().is_empty() {
            return Err(AppError::Validation);
        }

        let post = db::with_timeout(
            self.timeout,
            "posts.create",
            post_repo::create_post(&self.pool, Uuid::new_v4(), author_id, content),
        )
        .await?;

        tracing::info!(post_id = %post.id, author_id = %author_id, "post created");
        Ok(post)
    }

    /// Like a post. Idempotent: re-liking leaves exactly one entry.
    pub async fn like(&self, post_id: Uuid, user_id: Uuid) -> Result<Post> {
        db::with_timeout(
            self.timeout,
            "posts.like",
            post_repo::add_like(&self.pool, post_id, user_id),
        )
        .await?
        .ok_or(AppError::NotFound("Post"))
    }

    /// Unlike a post. Idempotent: unliking a never-liked post is a no-op.
    pub async fn unlike(&self, post_id: Uuid, user_id: Uuid) -> Result<Post> {
        db::with_timeout(
            self.timeout,
            "posts.unlike",
            post_repo::remove_like(&self.pool, post_id, user_id),
        )
        .await?
        .ok_or(AppError::NotFound("Post"))
    }

    /// One page of posts, newest first, keyed by id, plus the pagination
    /// envelope. A caller that already knows the total may pass it to skip
    /// the count query.
    pub async fn list_page(
        &self,
        current_page: i64,
        page_size: i64,
        total_hint: Option<i64>,
    ) -> Result<(HashMap<Uuid, Post>, Pagination)> {
        let current_page = current_page.max(1);
        let page_size = page_size.max(1);

        let total_records = match total_hint {
            Some(total) => total,
            None => {
                db::with_timeout(self.timeout, "posts.count", post_repo::count_posts(&self.pool))
                    .await?
            }
        };

        let posts = db::with_timeout(
            self.timeout,
            "posts.page",
            post_repo::find_page(&self.pool, page_size, page_offset(current_page, page_size)),
        )
        .await?;

        let pagination = Pagination {
            current_page,
            page_size,
            total_records,
            has_more_records: has_more_records(posts.len(), page_size),
        };

        Ok((keyed_by_id(posts, |post| post.id), pagination))
    }

    /// Bulk fetch keyed by post id
    pub async fn by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Post>> {
        let posts = db::with_timeout(
            self.timeout,
            "posts.find_by_ids",
            post_repo::find_by_ids(&self.pool, ids),
        )
        .await?;

        Ok(keyed_by_id(posts, |post| post.id))
    }
}

// Both values arrive from an unauthenticated query string; saturate rather
// than overflow on absurd page numbers.
fn page_offset(current_page: i64, page_size: i64) -> i64 {
    current_page.saturating_sub(1).saturating_mul(page_size)
}

/// Full page means "probably more". Over-reports when the collection ends
/// exactly on a page boundary; preserved as-is, callers rely on it.
fn has_more_records(fetched: usize, page_size: i64) -> bool {
    fetched as i64 >= page_size
}
