//! Domain Layer
//!
//! Stored entities and the backend error type. Content types themselves
//! live in the shared `site-content` crate.

mod entity;
mod submission;

pub use entity::{DomainError, DomainResult, Entity};
pub use submission::{StoredAttachment, StoredSubmission};
