//! Single-page intake forms

use serde::{Deserialize, Serialize};

use crate::validation::{require, require_email, ValidationErrors};

pub const MAX_ATTACHMENTS: usize = 5;
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name);
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "message", &self.message);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub company: String,
    pub service: String,
    pub budget: String,
    pub details: String,
}

impl QuoteRequest {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name);
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "service", &self.service);
        require(&mut errors, "details", &self.details);
        errors
    }
}

/// A file picked on the local machine, not yet stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRef {
    pub path: String,
    pub file_name: String,
    pub size_bytes: u64,
}

impl AttachmentRef {
    pub fn has_pdf_extension(&self) -> bool {
        self.file_name.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// Upload bounds; the backend overrides them from its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentLimits {
    pub max_count: usize,
    pub max_bytes: u64,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_count: MAX_ATTACHMENTS,
            max_bytes: MAX_ATTACHMENT_BYTES,
        }
    }
}

pub fn validate_attachments(
    attachments: &[AttachmentRef],
    limits: AttachmentLimits,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if attachments.len() > limits.max_count {
        errors.push(
            "attachments",
            format!("at most {} files may be attached", limits.max_count),
        );
    }
    for (i, file) in attachments.iter().enumerate() {
        let field = format!("attachments[{}]", i);
        if !file.has_pdf_extension() {
            errors.push(field.as_str(), format!("{} is not a PDF", file.file_name));
        }
        if file.size_bytes > limits.max_bytes {
            errors.push(
                field.as_str(),
                format!(
                    "{} exceeds {} MiB",
                    file.file_name,
                    limits.max_bytes / (1024 * 1024)
                ),
            );
        }
    }
    errors
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HireUsRequest {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub details: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
}

impl HireUsRequest {
    pub fn validate(&self) -> ValidationErrors {
        self.validate_with(AttachmentLimits::default())
    }

    pub fn validate_with(&self, limits: AttachmentLimits) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name);
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "details", &self.details);
        errors.extend(validate_attachments(&self.attachments, limits));
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str, size_bytes: u64) -> AttachmentRef {
        AttachmentRef {
            path: format!("/tmp/{}", name),
            file_name: name.to_string(),
            size_bytes,
        }
    }

    #[test]
    fn test_contact_requires_message() {
        let form = ContactForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            ..Default::default()
        };
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message_for("message"), Some("is required"));
    }

    #[test]
    fn test_quote_uses_details_field() {
        let json = serde_json::json!({
            "name": "Ana",
            "email": "ana@example.com",
            "company": "",
            "service": "Consulting",
            "budget": "",
            "details": "Two week audit"
        });
        let quote: QuoteRequest = serde_json::from_value(json).unwrap();
        assert!(quote.validate().is_empty());
    }

    #[test]
    fn test_attachment_limits() {
        let limits = AttachmentLimits::default();
        let ok = vec![pdf("cv.PDF", 1024)];
        assert!(validate_attachments(&ok, limits).is_empty());

        let too_many: Vec<_> = (0..6).map(|i| pdf(&format!("{}.pdf", i), 10)).collect();
        assert!(validate_attachments(&too_many, limits)
            .message_for("attachments")
            .is_some());

        let bad = vec![pdf("notes.docx", 10), pdf("big.pdf", MAX_ATTACHMENT_BYTES + 1)];
        let errors = validate_attachments(&bad, limits);
        assert_eq!(errors.message_for("attachments[0]"), Some("notes.docx is not a PDF"));
        assert_eq!(errors.message_for("attachments[1]"), Some("big.pdf exceeds 5 MiB"));
    }

    #[test]
    fn test_hire_us_without_attachments_field() {
        let json = serde_json::json!({
            "name": "Ana",
            "email": "ana@example.com",
            "company": "Acme",
            "role": "CTO",
            "details": "Need a team of four"
        });
        let req: HireUsRequest = serde_json::from_value(json).unwrap();
        assert!(req.attachments.is_empty());
        assert!(req.validate().is_empty());
    }
}
