/// User service - registration, credential checks, profile lookups
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use crate::db::{self, user_repo};
use crate::error::{AppError, Result};
use crate::models::{keyed_by_id, User, UserProfile};
use crate::security::password;

pub struct UserService {
    pool: PgPool,
    timeout: Duration,
}

impl UserService {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Register a new user. The store's unique email constraint decides
    /// duplicates, so two concurrent registrations with the same email can
    /// never both succeed.
    pub async fn register(&self, name: &str, email: &str, raw_password: &str) -> Result<User> {
        if name.trim().is_empty() || email.trim().is_empty() || raw_password.is_empty() {
            return Err(AppError::Validation);
        }

        let password_hash = password::hash_password(raw_password)?;
        let user = db::with_timeout(
            self.timeout,
            "users.create",
            user_repo::create_user(&self.pool, Uuid::new_v4(), name, email, &password_hash),
        )
        .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Check credentials for login. Unknown email and wrong password are
    /// distinct failures with distinct statuses.
    pub async fn authenticate(&self, email: &str, raw_password: &str) -> Result<User> {
        if email.trim().is_empty() || raw_password.is_empty() {
            return Err(AppError::Validation);
        }

        let user = db::with_timeout(
            self.timeout,
            "users.find_by_email",
            user_repo::find_by_email(&self.pool, email),
        )
        .await?
        .ok_or(AppError::UnknownUser)?;

        password::verify_password(raw_password, &user.password_hash)?;
        Ok(user)
    }

    /// Profile of the acting user, without the credential hash
    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile> {
        db::with_timeout(
            self.timeout,
            "users.find_profile",
            user_repo::find_profile_by_id(&self.pool, user_id),
        )
        .await?
        .ok_or(AppError::NotFound("User"))
    }

    /// Bulk profile fetch keyed by user id
    pub async fn profiles_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, UserProfile>> {
        let profiles = db::with_timeout(
            self.timeout,
            "users.find_profiles",
            user_repo::find_profiles_by_ids(&self.pool, ids),
        )
        .await?;

        Ok(keyed_by_id(profiles, |profile| profile.id))
    }
}
