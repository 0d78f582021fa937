/// Data models for the social content service
///
/// - `User`: identity record; the credential hash never leaves this module
///   in serialized form (`UserProfile` is the outward projection).
/// - `Post`: content plus its liker set and top-level comment ids.
/// - `Comment`: content plus its reply ids. A comment does not know its
///   parent; attachment is recorded on the parent's child list only.
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

/// Identity store row. Not `Serialize` on purpose: handlers must go through
/// `UserProfile` so the password hash cannot leak into a response.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Outward projection of a user, without the credential hash
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    /// Monotone insertion sequence; pagination tiebreak, not part of the API
    #[serde(skip_serializing)]
    pub seq: i64,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Liker user ids in like order, at most one entry per user
    pub likes: Vec<Uuid>,
    /// Top-level comment ids in insertion (display) order
    pub comments: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Reply comment ids in insertion order
    pub replies: Vec<Uuid>,
}

/// Pagination envelope returned with post listings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub page_size: i64,
    pub total_records: i64,
    /// Heuristic: true whenever the fetched page is full. Over-reports when
    /// the collection ends exactly on a page boundary; callers know this.
    pub has_more_records: bool,
}

/// Bulk-fetch responses are keyed by entity id so callers get O(1) lookup.
pub fn keyed_by_id<T, F>(items: Vec<T>, id_of: F) -> HashMap<Uuid, T>
where
    F: Fn(&T) -> Uuid,
{
    items.into_iter().map(|item| (id_of(&item), item)).collect()
}
