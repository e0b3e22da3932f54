//! Freelancer Registration Wizard
//!
//! Four data steps plus a read-only review step.

use serde::{Deserialize, Serialize};

use crate::validation::{optional_url, require, require_email, ValidationErrors};
use crate::wizard::WizardForm;

/// Choices offered for the primary domain select
pub const PRIMARY_DOMAINS: &[&str] = &[
    "Web Development",
    "Mobile Development",
    "Cloud & DevOps",
    "Data & AI",
    "UI/UX Design",
    "Quality Assurance",
    "Digital Marketing",
];

pub const MAX_HOURS_PER_WEEK: u8 = 80;
pub const MIN_BIO_CHARS: usize = 20;
pub const MAX_BIO_CHARS: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expertise {
    pub primary_domain: String,
    pub skills: Vec<String>,
    pub years_experience: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub portfolio_url: String,
    pub linkedin_url: String,
    pub bio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub hours_per_week: u8,
    pub hourly_rate_usd: Option<u32>,
    /// ISO date, e.g. 2026-11-01
    pub start_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerRegistration {
    pub personal: PersonalInfo,
    pub expertise: Expertise,
    pub portfolio: Portfolio,
    pub availability: Availability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreelancerStep {
    Personal,
    Expertise,
    Portfolio,
    Availability,
    Review,
}

/// Each step replaces the slice it owns
#[derive(Debug, Clone, PartialEq)]
pub enum FreelancerUpdate {
    Personal(PersonalInfo),
    Expertise(Expertise),
    Portfolio(Portfolio),
    Availability(Availability),
}

/// Split a comma separated skills input into trimmed entries
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl WizardForm for FreelancerRegistration {
    type Step = FreelancerStep;
    type Update = FreelancerUpdate;

    fn steps() -> &'static [FreelancerStep] {
        &[
            FreelancerStep::Personal,
            FreelancerStep::Expertise,
            FreelancerStep::Portfolio,
            FreelancerStep::Availability,
            FreelancerStep::Review,
        ]
    }

    fn step_title(step: FreelancerStep) -> &'static str {
        match step {
            FreelancerStep::Personal => "Personal details",
            FreelancerStep::Expertise => "Expertise",
            FreelancerStep::Portfolio => "Portfolio",
            FreelancerStep::Availability => "Availability",
            FreelancerStep::Review => "Review",
        }
    }

    fn validate_step(&self, step: FreelancerStep) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match step {
            FreelancerStep::Personal => {
                let p = &self.personal;
                require(&mut errors, "fullName", &p.full_name);
                require_email(&mut errors, "email", &p.email);
                require(&mut errors, "country", &p.country);
            }
            FreelancerStep::Expertise => {
                require(&mut errors, "primaryDomain", &self.expertise.primary_domain);
            }
            FreelancerStep::Portfolio => {
                let p = &self.portfolio;
                optional_url(&mut errors, "portfolioUrl", &p.portfolio_url);
                optional_url(&mut errors, "linkedinUrl", &p.linkedin_url);
                let bio_len = p.bio.trim().chars().count();
                if bio_len > 0 && !(MIN_BIO_CHARS..=MAX_BIO_CHARS).contains(&bio_len) {
                    errors.push(
                        "bio",
                        format!("must be {} to {} characters", MIN_BIO_CHARS, MAX_BIO_CHARS),
                    );
                }
            }
            FreelancerStep::Availability => {
                let a = &self.availability;
                if a.hours_per_week == 0 || a.hours_per_week > MAX_HOURS_PER_WEEK {
                    errors.push(
                        "hoursPerWeek",
                        format!("must be between 1 and {}", MAX_HOURS_PER_WEEK),
                    );
                }
                require(&mut errors, "startDate", &a.start_date);
            }
            FreelancerStep::Review => {}
        }
        errors
    }

    fn apply(&mut self, update: FreelancerUpdate) {
        match update {
            FreelancerUpdate::Personal(personal) => self.personal = personal,
            FreelancerUpdate::Expertise(expertise) => self.expertise = expertise,
            FreelancerUpdate::Portfolio(portfolio) => self.portfolio = portfolio,
            FreelancerUpdate::Availability(availability) => self.availability = availability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Wizard;

    fn personal() -> PersonalInfo {
        PersonalInfo {
            full_name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            phone: String::new(),
            country: "Brazil".into(),
        }
    }

    #[test]
    fn test_next_enabled_once_primary_domain_set() {
        let mut wizard = Wizard::<FreelancerRegistration>::new();
        wizard.update(FreelancerUpdate::Personal(personal()));
        wizard.next().unwrap();
        assert_eq!(wizard.current_step(), FreelancerStep::Expertise);

        assert!(!wizard.can_go_next());

        let mut expertise = wizard.form().expertise.clone();
        expertise.primary_domain = "Web Development".into();
        wizard.update(FreelancerUpdate::Expertise(expertise));
        assert!(wizard.can_go_next());
    }

    #[test]
    fn test_personal_step_checks_email_format() {
        let mut form = FreelancerRegistration::default();
        form.personal = personal();
        form.personal.email = "ana.example.com".into();
        let errors = form.validate_step(FreelancerStep::Personal);
        assert_eq!(errors.message_for("email"), Some("must be a valid email address"));
    }

    #[test]
    fn test_availability_bounds() {
        let mut form = FreelancerRegistration::default();
        form.availability.start_date = "2026-11-01".into();
        form.availability.hours_per_week = 81;
        assert!(!form.validate_step(FreelancerStep::Availability).is_empty());
        form.availability.hours_per_week = 20;
        assert!(form.validate_step(FreelancerStep::Availability).is_empty());
    }

    #[test]
    fn test_short_bio_rejected_blank_bio_allowed() {
        let mut form = FreelancerRegistration::default();
        assert!(form.validate_step(FreelancerStep::Portfolio).is_empty());
        form.portfolio.bio = "Too short".into();
        assert!(form.validate_step(FreelancerStep::Portfolio).message_for("bio").is_some());
        form.portfolio.bio = "Ten years building web platforms.".into();
        assert!(form.validate_step(FreelancerStep::Portfolio).is_empty());
    }

    #[test]
    fn test_parse_skills() {
        assert_eq!(parse_skills(" rust, ,wasm,sql "), vec!["rust", "wasm", "sql"]);
        assert!(parse_skills("").is_empty());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let form = FreelancerRegistration::default();
        let json = serde_json::to_value(&form).unwrap();
        assert!(json["expertise"].get("primaryDomain").is_some());
        assert!(json["availability"].get("hoursPerWeek").is_some());
    }
}
