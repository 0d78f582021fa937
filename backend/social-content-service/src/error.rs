/// Error types for the social content service
///
/// Every failure is rendered as a small JSON body `{"msg": ...}` with the
/// status codes from the error taxonomy. Authentication failures are
/// deliberately generic so the response never reveals which check failed.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or empty required field
    #[error("Please provide all required fields")]
    Validation,

    /// Email already registered
    #[error("User with this email already exists")]
    DuplicateEmail,

    /// Login attempted against an unknown email
    #[error("User does not exist")]
    UnknownUser,

    /// Wrong password on login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, invalid, or expired bearer token. The precise failure kind
    /// is logged at the gate; the response body never distinguishes them.
    #[error("Authorization denied")]
    Unauthorized,

    /// A post/comment/user id did not resolve to an existing record
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Storage call exceeded its timeout; retryable by the caller when the
    /// operation is idempotent (like/unlike)
    #[error("Server error")]
    StorageTimeout,

    /// Database operation failed
    #[error("Server error")]
    Database(#[source] sqlx::Error),

    /// Anything else we do not want to leak
    #[error("Server error")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation | AppError::DuplicateEmail | AppError::UnknownUser => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StorageTimeout | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Database(err) = self {
            tracing::error!(error = %err, "database operation failed");
        }
        if let AppError::Internal(msg) = self {
            tracing::error!(%msg, "internal error");
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "msg": self.to_string(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            // The only unique constraint in the schema is users.email
            return AppError::DuplicateEmail;
        }
        AppError::Database(err)
    }
}

/// Postgres unique-violation (SQLSTATE 23505)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}
