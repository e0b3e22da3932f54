//! Frontend Models
//!
//! Data structures matching backend entities, plus UI-only state types.

use serde::{Deserialize, Serialize};
use site_content::{AttachmentLimits, Submission};

/// Public part of the backend configuration (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfigView {
    pub image_base_url: String,
    pub max_attachments: usize,
    pub max_attachment_bytes: u64,
}

impl Default for SiteConfigView {
    fn default() -> Self {
        let limits = AttachmentLimits::default();
        Self {
            image_base_url: String::new(),
            max_attachments: limits.max_count,
            max_attachment_bytes: limits.max_bytes,
        }
    }
}

impl SiteConfigView {
    pub fn attachment_limits(&self) -> AttachmentLimits {
        AttachmentLimits {
            max_count: self.max_attachments,
            max_bytes: self.max_attachment_bytes,
        }
    }
}

/// A PDF held in app storage (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAttachment {
    pub id: i64,
    pub file_name: String,
    pub size_bytes: u64,
    pub content_hash: String,
    pub stored_path: String,
}

/// Full stored submission shown in the inbox detail pane (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetail {
    pub id: i64,
    pub submission: Submission,
    pub created_at: String,
    #[serde(default)]
    pub attachments: Vec<StoredAttachment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// Transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub level: ToastLevel,
    pub message: String,
}

/// Top-level dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Sections,
    Intake,
    Inbox,
    Diagnostics,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [
        DashboardTab::Sections,
        DashboardTab::Intake,
        DashboardTab::Inbox,
        DashboardTab::Diagnostics,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Sections => "Homepage",
            DashboardTab::Intake => "Intake forms",
            DashboardTab::Inbox => "Submissions",
            DashboardTab::Diagnostics => "Logs",
        }
    }
}

/// Human-readable byte count ("512 B", "1.5 KiB", "5.0 MiB")
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    let value = bytes as f64;
    if value >= MIB {
        format!("{:.1} MiB", value / MIB)
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn test_config_defaults_match_shared_limits() {
        let limits = SiteConfigView::default().attachment_limits();
        assert_eq!(limits, AttachmentLimits::default());
    }

    #[test]
    fn test_detail_decodes_backend_shape() {
        let json = serde_json::json!({
            "id": 3,
            "submission": {
                "kind": "contact",
                "data": {"name": "Ana", "email": "ana@example.com", "subject": "", "message": "Hi"}
            },
            "createdAt": "2026-10-01T09:00:00Z",
            "attachments": []
        });
        let detail: SubmissionDetail = serde_json::from_value(json).unwrap();
        assert_eq!(detail.id, 3);
        assert_eq!(detail.submission.contact(), ("Ana", "ana@example.com"));
    }
}
