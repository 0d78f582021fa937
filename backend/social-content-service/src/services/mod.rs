/// Business logic layer: the interaction engine
///
/// Services enforce the invariants (non-empty content, idempotent likes,
/// single-parent attachment) on top of the repositories and bound every
/// storage call with the configured timeout.
pub mod comments;
pub mod posts;
pub mod users;

pub use comments::CommentService;
pub use posts::PostService;
pub use users::UserService;
