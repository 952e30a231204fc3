// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures raised by value objects, rankers and article stores.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A value object rejected its input (title, slug, email, tag name...).
    #[error("validation error: {0}")]
    Validation(String),
    /// A uniqueness rule or an optimistic status update lost a race.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// The store could not be reached or returned an unexpected error.
    #[error("storage error: {0}")]
    Persistence(String),
}
