//! Field Validation
//!
//! Validation failures are collected per field so forms can render them
//! inline next to the offending input.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One failed check on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulated validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationError::new(field, message));
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    /// Prefix every field name, e.g. `title` -> `items[2].title`
    pub fn scoped(self, prefix: &str) -> Self {
        Self(
            self.0
                .into_iter()
                .map(|e| ValidationError::new(format!("{}.{}", prefix, e.field), e.message))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// First message recorded for a field, for inline rendering
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url pattern is valid"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

pub fn is_valid_url(value: &str) -> bool {
    url_regex().is_match(value.trim())
}

/// Record an error when `value` is blank
pub fn require(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "is required");
    }
}

/// Record an error when `value` is blank or not an email address
pub fn require_email(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "is required");
    } else if !is_valid_email(value) {
        errors.push(field, "must be a valid email address");
    }
}

/// Record an error when a non-blank `value` is not an http(s) URL
pub fn optional_url(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !value.trim().is_empty() && !is_valid_url(value) {
        errors.push(field, "must be an http(s) URL");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("  jane.doe+work@mail.example.org "));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("jane example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_require_records_blank_fields() {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", "   ");
        require(&mut errors, "description", "ok");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message_for("title"), Some("is required"));
    }

    #[test]
    fn test_scoped_prefixes_fields() {
        let mut errors = ValidationErrors::new();
        errors.push("title", "is required");
        let scoped = errors.scoped("items[3]");
        assert_eq!(scoped.message_for("items[3].title"), Some("is required"));
    }

    #[test]
    fn test_optional_url() {
        let mut errors = ValidationErrors::new();
        optional_url(&mut errors, "portfolioUrl", "");
        optional_url(&mut errors, "linkedinUrl", "https://linkedin.com/in/jane");
        assert!(errors.is_empty());
        optional_url(&mut errors, "portfolioUrl", "not a url");
        assert_eq!(errors.len(), 1);
    }
}
