//! Wire-level errors shared by backend commands and frontend bindings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Error returned across the command boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ApiError {
    /// Input rejected; never persisted
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    /// Referenced record does not exist (stale id)
    #[error("not found: {0}")]
    NotFound(String),
    /// Request could not be delivered or the response could not be decoded
    #[error("network error: {0}")]
    Network(String),
    /// Backend failed while handling the request
    #[error("server error: {0}")]
    Server(String),
}

impl ApiError {
    /// Errors worth offering a manual retry for
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server(_))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_is_tagged() {
        let err = ApiError::NotFound("services item 12".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "not_found");
        assert_eq!(json["detail"], "services item 12");

        let back: ApiError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_validation_detail_is_field_list() {
        let mut errors = ValidationErrors::new();
        errors.push("items[0].title", "is required");
        let json = serde_json::to_value(ApiError::from(errors)).unwrap();
        assert_eq!(json["detail"][0]["field"], "items[0].title");
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::Network("offline".into()).is_retryable());
        assert!(!ApiError::NotFound("x".into()).is_retryable());
    }
}
