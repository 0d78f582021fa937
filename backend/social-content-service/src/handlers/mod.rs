/// HTTP handlers for the social content endpoints
pub mod comments;
pub mod posts;
pub mod users;

pub use comments::{create_comment, get_comments_batch, reply_to_comment};
pub use posts::{create_post, get_posts_batch, like_post, list_posts, unlike_post};
pub use users::{current_user, get_users_batch, login, register};
