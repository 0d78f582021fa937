/// Post handlers - listing, creation, likes
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::Result;
use crate::models::{Pagination, Post};
use crate::services::posts::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub current_page: Option<i64>,
    pub page_size: Option<i64>,
    /// Clients that already know the total pass it back to skip the count
    pub total_records: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ListPostsResponse {
    pub posts: HashMap<Uuid, Post>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PostsBatchRequest {
    #[serde(rename = "postIds")]
    pub post_ids: Vec<Uuid>,
}

/// Paginated post listing, newest first, keyed by post id
/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let (posts, pagination) = state
        .posts()
        .list_page(
            query.current_page.unwrap_or(DEFAULT_PAGE),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            query.total_records,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ListPostsResponse { posts, pagination }))
}

/// Create a new post
/// POST /api/posts/create
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = state.posts().create(user.id, &req.content).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Like a post (idempotent)
/// PUT /api/posts/like/{post_id}
pub async fn like_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = state.posts().like(*post_id, user.id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Remove a like from a post (idempotent)
/// PUT /api/posts/unlike/{post_id}
pub async fn unlike_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = state.posts().unlike(*post_id, user.id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Bulk post fetch, keyed by post id
/// POST /api/posts
pub async fn get_posts_batch(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    req: web::Json<PostsBatchRequest>,
) -> Result<HttpResponse> {
    let posts = state.posts().by_ids(&req.post_ids).await?;
    Ok(HttpResponse::Ok().json(posts))
}
