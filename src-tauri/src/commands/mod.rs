//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod dialog_cmd;
mod document_cmd;
mod section_cmd;
mod submission_cmd;
mod system_cmd;

pub use dialog_cmd::*;
pub use document_cmd::*;
pub use section_cmd::*;
pub use submission_cmd::*;
pub use system_cmd::*;

use site_content::ApiError;

use crate::domain::{DomainError, DomainResult};

/// Log a failed operation and convert it for the wire
pub(crate) fn respond<T>(operation: &str, result: DomainResult<T>) -> Result<T, ApiError> {
    result.map_err(|err| {
        match &err {
            DomainError::Invalid(errors) => log::warn!("{} rejected: {}", operation, errors),
            DomainError::NotFound(what) => log::warn!("{}: {} not found", operation, what),
            other => log::error!("{} failed: {}", operation, other),
        }
        ApiError::from(err)
    })
}
