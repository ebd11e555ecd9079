//! Repository Module
//!
//! Free async functions per entity operating on `&SqlitePool`.
//! Multi-statement invariants (approve-and-provision, user-with-profile
//! creation) run inside a single SQLite transaction here; everything
//! else is a single-record read or write.

pub mod attendance;
pub mod member_profile;
pub mod membership_request;
pub mod plan;
pub mod session;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
