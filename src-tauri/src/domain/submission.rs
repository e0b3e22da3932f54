//! Stored Submissions
//!
//! An intake form as persisted: the validated envelope plus the files that
//! were copied into app storage alongside it.

use serde::{Deserialize, Serialize};
use site_content::{Submission, SubmissionReceipt, SubmissionSummary};

use super::entity::Entity;

/// A PDF copied into app storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAttachment {
    pub id: i64,
    pub file_name: String,
    pub size_bytes: u64,
    /// blake3 hex digest of the content
    pub content_hash: String,
    pub stored_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSubmission {
    pub id: i64,
    pub submission: Submission,
    /// RFC 3339
    pub created_at: String,
    pub attachments: Vec<StoredAttachment>,
}

impl StoredSubmission {
    /// Not yet persisted; the repository assigns `id`
    pub fn new(submission: Submission, created_at: String) -> Self {
        Self {
            id: 0,
            submission,
            created_at,
            attachments: Vec::new(),
        }
    }

    pub fn receipt(&self) -> SubmissionReceipt {
        SubmissionReceipt {
            id: self.id,
            kind: self.submission.kind(),
            received_at: self.created_at.clone(),
            attachment_count: self.attachments.len(),
        }
    }

    pub fn summary(&self) -> SubmissionSummary {
        let (name, email) = self.submission.contact();
        SubmissionSummary {
            id: self.id,
            kind: self.submission.kind(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: self.created_at.clone(),
            attachment_count: self.attachments.len(),
        }
    }
}

impl Entity for StoredSubmission {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}
