//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for stored entities.
//! All entities must have a unique ID and be thread-safe.

use site_content::{ApiError, ValidationErrors};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Invalid(ValidationErrors),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        DomainError::Internal(err.to_string())
    }

    /// Single-field validation failure
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.push(field, message);
        DomainError::Invalid(errors)
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Invalid(errors)
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Internal(format!("stored payload is malformed: {}", err))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(what) => ApiError::NotFound(what),
            DomainError::Invalid(errors) => ApiError::Validation(errors),
            DomainError::Conflict(msg) | DomainError::Internal(msg) => ApiError::Server(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_mapping() {
        let api: ApiError = DomainError::NotFound("services item x".into()).into();
        assert_eq!(api, ApiError::NotFound("services item x".into()));

        let api: ApiError = DomainError::invalid("heading", "is required").into();
        assert!(matches!(api, ApiError::Validation(ref e) if e.message_for("heading").is_some()));

        let api: ApiError = DomainError::Conflict("duplicate id".into()).into();
        assert!(api.is_retryable());
    }
}
