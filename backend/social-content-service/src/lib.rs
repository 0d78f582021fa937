/// Social content service
///
/// A minimal social-content backend: users register and authenticate, create
/// posts, like/unlike posts, and attach comments and threaded replies.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `models`: data structures for users, posts, comments
/// - `services`: business logic (the interaction engine)
/// - `db`: repositories over sqlx/Postgres
/// - `security`: credential hashing and bearer tokens
/// - `auth`: the access gate extractor for protected routes
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod security;
pub mod services;

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use security::TokenKeys;
use services::{CommentService, PostService, UserService};

pub use config::Config;
pub use error::{AppError, Result};

/// Shared application state, constructed once at startup and injected into
/// every handler. Holds the storage pool, the token signing material, and
/// the per-call storage timeout; there are no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub keys: Arc<TokenKeys>,
    pub storage_timeout: Duration,
}

impl AppState {
    pub fn new(db: PgPool, keys: TokenKeys, storage_timeout: Duration) -> Self {
        Self {
            db,
            keys: Arc::new(keys),
            storage_timeout,
        }
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.db.clone(), self.storage_timeout)
    }

    pub fn posts(&self) -> PostService {
        PostService::new(self.db.clone(), self.storage_timeout)
    }

    pub fn comments(&self) -> CommentService {
        CommentService::new(self.db.clone(), self.storage_timeout)
    }
}

/// Register the API route table. Shared between `main` and the integration
/// tests so both serve the identical surface.
pub fn api_routes(cfg: &mut actix_web::web::ServiceConfig) {
    use actix_web::web;
    use crate::handlers::{comments, posts, users};

    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/users")
                    .route("/register", web::post().to(users::register))
                    .route("/login", web::post().to(users::login))
                    .route("/current", web::get().to(users::current_user))
                    .service(web::resource("").route(web::post().to(users::get_users_batch))),
            )
            .service(
                web::scope("/posts")
                    .route("/create", web::post().to(posts::create_post))
                    .route("/like/{post_id}", web::put().to(posts::like_post))
                    .route("/unlike/{post_id}", web::put().to(posts::unlike_post))
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::list_posts))
                            .route(web::post().to(posts::get_posts_batch)),
                    ),
            )
            .service(
                web::scope("/comments")
                    .route("/create/{post_id}", web::post().to(comments::create_comment))
                    .route(
                        "/reply/{comment_id}",
                        web::post().to(comments::reply_to_comment),
                    )
                    .service(
                        web::resource("").route(web::post().to(comments::get_comments_batch)),
                    ),
            ),
    );
}

/// Malformed or incomplete JSON bodies map to the same validation failure
/// as an empty required field.
pub fn json_config() -> actix_web::web::JsonConfig {
    actix_web::web::JsonConfig::default()
        .limit(1 << 20)
        .error_handler(|err, _req| {
            tracing::debug!(error = %err, "rejected request body");
            AppError::Validation.into()
        })
}
