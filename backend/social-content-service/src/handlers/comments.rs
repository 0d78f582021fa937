/// Comment handlers - comments on posts, replies to comments
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::Result;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentsBatchRequest {
    #[serde(rename = "commentIds")]
    pub comment_ids: Vec<Uuid>,
}

/// Comment on a post; the new comment is appended to the post's list
/// POST /api/comments/create/{post_id}
pub async fn create_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let comment = state
        .comments()
        .comment_on_post(*post_id, user.id, &req.content)
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// Reply to a comment; the reply is appended to the comment's reply list
/// POST /api/comments/reply/{comment_id}
pub async fn reply_to_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    comment_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let reply = state
        .comments()
        .reply_to_comment(*comment_id, user.id, &req.content)
        .await?;
    Ok(HttpResponse::Ok().json(reply))
}

/// Bulk comment fetch, keyed by comment id
/// POST /api/comments
pub async fn get_comments_batch(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    req: web::Json<CommentsBatchRequest>,
) -> Result<HttpResponse> {
    let comments = state.comments().by_ids(&req.comment_ids).await?;
    Ok(HttpResponse::Ok().json(comments))
}
