//! Get-Started Wizard
//!
//! Project quoting flow: what service, what scope, who to contact.

use serde::{Deserialize, Serialize};

use crate::validation::{require, require_email, ValidationErrors};
use crate::wizard::WizardForm;

pub const SERVICE_TYPES: &[&str] = &[
    "Custom Software",
    "Web Application",
    "Mobile App",
    "Cloud Migration",
    "Dedicated Team",
    "Consulting",
];

pub const BUDGET_RANGES: &[&str] = &[
    "Under $10k",
    "$10k - $50k",
    "$50k - $100k",
    "Over $100k",
    "Not sure yet",
];

pub const TIMELINES: &[&str] = &["ASAP", "1-3 months", "3-6 months", "6+ months", "Flexible"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceChoice {
    pub service_type: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScope {
    pub budget_range: String,
    pub timeline: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStarted {
    pub service: ServiceChoice,
    pub project: ProjectScope,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetStartedStep {
    Service,
    Project,
    Contact,
    Review,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GetStartedUpdate {
    Service(ServiceChoice),
    Project(ProjectScope),
    Contact(ContactInfo),
}

impl WizardForm for GetStarted {
    type Step = GetStartedStep;
    type Update = GetStartedUpdate;

    fn steps() -> &'static [GetStartedStep] {
        &[
            GetStartedStep::Service,
            GetStartedStep::Project,
            GetStartedStep::Contact,
            GetStartedStep::Review,
        ]
    }

    fn step_title(step: GetStartedStep) -> &'static str {
        match step {
            GetStartedStep::Service => "Service",
            GetStartedStep::Project => "Project",
            GetStartedStep::Contact => "Contact",
            GetStartedStep::Review => "Review",
        }
    }

    fn validate_step(&self, step: GetStartedStep) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match step {
            GetStartedStep::Service => {
                require(&mut errors, "serviceType", &self.service.service_type);
                require(&mut errors, "summary", &self.service.summary);
            }
            GetStartedStep::Project => {
                require(&mut errors, "budgetRange", &self.project.budget_range);
                require(&mut errors, "timeline", &self.project.timeline);
            }
            GetStartedStep::Contact => {
                require(&mut errors, "name", &self.contact.name);
                require_email(&mut errors, "email", &self.contact.email);
            }
            GetStartedStep::Review => {}
        }
        errors
    }

    fn apply(&mut self, update: GetStartedUpdate) {
        match update {
            GetStartedUpdate::Service(service) => self.service = service,
            GetStartedUpdate::Project(project) => self.project = project,
            GetStartedUpdate::Contact(contact) => self.contact = contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Wizard;

    #[test]
    fn test_full_flow_reaches_review() {
        let mut wizard = Wizard::<GetStarted>::new();
        wizard.update(GetStartedUpdate::Service(ServiceChoice {
            service_type: "Web Application".into(),
            summary: "Customer portal".into(),
        }));
        wizard.next().unwrap();
        wizard.update(GetStartedUpdate::Project(ProjectScope {
            budget_range: "$10k - $50k".into(),
            timeline: "1-3 months".into(),
            details: String::new(),
        }));
        wizard.next().unwrap();
        assert!(!wizard.can_go_next());
        wizard.update(GetStartedUpdate::Contact(ContactInfo {
            name: "Lee".into(),
            email: "lee@example.com".into(),
            ..Default::default()
        }));
        assert_eq!(wizard.next().unwrap(), GetStartedStep::Review);
        assert!(wizard.finish().is_ok());
    }

    #[test]
    fn test_clear_progress_discards_entries() {
        let mut wizard = Wizard::<GetStarted>::new();
        wizard.update(GetStartedUpdate::Service(ServiceChoice {
            service_type: "Consulting".into(),
            summary: "Audit".into(),
        }));
        wizard.next().unwrap();
        wizard.clear_progress();
        assert_eq!(wizard.current_step(), GetStartedStep::Service);
        assert_eq!(wizard.form().service, ServiceChoice::default());
    }
}
