use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Result type returned by all service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,
    /// The submitted payload failed validation.
    #[error("{0}")]
    Form(String),
    /// The persistence layer failed.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            err => ServiceError::Repository(err),
        }
    }
}
