//! Intake Submissions
//!
//! Every public form lands in one tagged envelope so the backend stores and
//! lists them uniformly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::forms::{AttachmentLimits, AttachmentRef, ContactForm, HireUsRequest, QuoteRequest};
use crate::freelancer::FreelancerRegistration;
use crate::get_started::GetStarted;
use crate::validation::ValidationErrors;
use crate::wizard::validate_all_steps;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionKind {
    Contact,
    Quote,
    HireUs,
    Freelancer,
    GetStarted,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 5] = [
        SubmissionKind::Contact,
        SubmissionKind::Quote,
        SubmissionKind::HireUs,
        SubmissionKind::Freelancer,
        SubmissionKind::GetStarted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Contact => "contact",
            SubmissionKind::Quote => "quote",
            SubmissionKind::HireUs => "hire-us",
            SubmissionKind::Freelancer => "freelancer",
            SubmissionKind::GetStarted => "get-started",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionKind::Contact => "Contact",
            SubmissionKind::Quote => "Quote request",
            SubmissionKind::HireUs => "Hire us",
            SubmissionKind::Freelancer => "Freelancer registration",
            SubmissionKind::GetStarted => "Get started",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown submission kind: {0}")]
pub struct UnknownSubmissionKind(pub String);

impl FromStr for SubmissionKind {
    type Err = UnknownSubmissionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmissionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownSubmissionKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum Submission {
    Contact(ContactForm),
    Quote(QuoteRequest),
    HireUs(HireUsRequest),
    Freelancer(FreelancerRegistration),
    GetStarted(GetStarted),
}

impl Submission {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Submission::Contact(_) => SubmissionKind::Contact,
            Submission::Quote(_) => SubmissionKind::Quote,
            Submission::HireUs(_) => SubmissionKind::HireUs,
            Submission::Freelancer(_) => SubmissionKind::Freelancer,
            Submission::GetStarted(_) => SubmissionKind::GetStarted,
        }
    }

    pub fn validate(&self, limits: AttachmentLimits) -> ValidationErrors {
        match self {
            Submission::Contact(form) => form.validate(),
            Submission::Quote(form) => form.validate(),
            Submission::HireUs(form) => form.validate_with(limits),
            Submission::Freelancer(form) => validate_all_steps(form),
            Submission::GetStarted(form) => validate_all_steps(form),
        }
    }

    /// Name and email of whoever filled in the form
    pub fn contact(&self) -> (&str, &str) {
        match self {
            Submission::Contact(f) => (&f.name, &f.email),
            Submission::Quote(f) => (&f.name, &f.email),
            Submission::HireUs(f) => (&f.name, &f.email),
            Submission::Freelancer(f) => (&f.personal.full_name, &f.personal.email),
            Submission::GetStarted(f) => (&f.contact.name, &f.contact.email),
        }
    }

    pub fn attachments(&self) -> &[AttachmentRef] {
        match self {
            Submission::HireUs(f) => &f.attachments,
            _ => &[],
        }
    }
}

/// Returned to the submitter once the form is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: i64,
    pub kind: SubmissionKind,
    /// RFC 3339 timestamp
    pub received_at: String,
    pub attachment_count: usize,
}

/// One row of the admin submissions listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub id: i64,
    pub kind: SubmissionKind,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub attachment_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_is_tagged_by_kind() {
        let sub = Submission::Contact(ContactForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            subject: String::new(),
            message: "Hello".into(),
        });
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["kind"], "contact");
        assert_eq!(json["data"]["message"], "Hello");
        assert_eq!(sub.contact(), ("Ana", "ana@example.com"));
    }

    #[test]
    fn test_wizard_submissions_validate_every_step() {
        let sub = Submission::Freelancer(FreelancerRegistration::default());
        let errors = sub.validate(AttachmentLimits::default());
        assert!(errors.message_for("fullName").is_some());
        assert!(errors.message_for("primaryDomain").is_some());
        assert!(errors.message_for("startDate").is_some());
    }

    #[test]
    fn test_kind_slug_round_trip() {
        for kind in SubmissionKind::ALL {
            assert_eq!(kind.as_str().parse::<SubmissionKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
