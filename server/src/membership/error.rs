//! Lifecycle engine errors

use crate::db::repository::RepoError;
use crate::utils::AppError;
use thiserror::Error;

/// Typed failures of the lifecycle operations. The HTTP boundary maps
/// each kind to a status code; nothing is swallowed or retried here.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Terminal-state request re-decided
    #[error("Request already processed")]
    AlreadyProcessed,

    /// Renewal attempted with no plan assigned
    #[error("Member does not have an active plan to renew")]
    NoActivePlan,

    /// Dangling reference (e.g. profile points at a deleted plan)
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

impl From<LifecycleError> for AppError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::Validation(msg) => AppError::Validation(msg),
            LifecycleError::NotFound(msg) => AppError::NotFound(msg),
            LifecycleError::AlreadyProcessed => {
                AppError::Conflict("Request already processed".into())
            }
            LifecycleError::NoActivePlan => {
                AppError::BusinessRule("Member does not have an active plan to renew".into())
            }
            LifecycleError::Configuration(msg) => AppError::Configuration(msg),
            LifecycleError::Repo(e) => e.into(),
        }
    }
}
