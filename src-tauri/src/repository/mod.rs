//! Repository Layer
//!
//! Data access abstractions and implementations.

mod attachment_store;
mod db;
mod document_repo;
mod home_repo;
mod section_repo;
mod submission_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use attachment_store::AttachmentStore;
pub use db::{init_db, SharedConnection};
#[cfg(test)]
pub use db::init_memory_db;
pub use document_repo::DocumentRepository;
pub use home_repo::HomeRepository;
pub use section_repo::SectionRepository;
pub use submission_repo::SubmissionRepository;
pub use traits::Repository;
