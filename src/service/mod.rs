//! Compliance-record core: status derivation, expiry lookahead, and the
//! primary-contact invariant. HTTP handlers stay thin and call into here;
//! nothing above this layer writes status or `is_primary` columns directly.

use sea_orm::DbErr;
use thiserror::Error;

pub mod contacts;
pub mod documents;
pub mod employees;
pub mod expiry;
pub mod inductions;
pub mod licenses;
pub mod status;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("storage error")]
    Storage(#[from] DbErr),
}

impl ServiceError {
    /// Stable machine-readable code exposed to API callers.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ServiceError::InvariantViolation(_) => "INVARIANT_VIOLATION",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub(crate) fn require_non_empty(value: &str, field: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidArgument(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
