//! Homepage content model shared by the admin UI and the Tauri backend.
//!
//! Section records, the ordered-collection editor, the step wizard, and the
//! intake forms all live here so both sides validate against the same rules.

pub mod collection;
pub mod error;
pub mod forms;
pub mod freelancer;
pub mod get_started;
pub mod home;
pub mod order;
pub mod payload;
pub mod record;
pub mod section;
pub mod sections;
pub mod submission;
pub mod validation;
pub mod wizard;

pub use collection::{CollectionError, OrderedCollection, SaveOutcome, SaveTicket, SectionClient};
pub use error::ApiError;
pub use forms::{AttachmentLimits, AttachmentRef, ContactForm, HireUsRequest, QuoteRequest};
pub use freelancer::{FreelancerRegistration, FreelancerStep, FreelancerUpdate};
pub use get_started::{GetStarted, GetStartedStep, GetStartedUpdate};
pub use home::{
    resolve_image_url, DigitalHeader, HomePage, PlsAdvantage, QualityDigitalSection,
    SectionImages,
};
pub use order::Ordered;
pub use payload::{ListSection, SectionPayload, StoredRow};
pub use record::{FieldError, FieldKind, FieldSpec, SectionRecord};
pub use section::SectionKind;
pub use sections::{
    BlogPostCard, DigitalService, HeroSlide, IndustryCard, ItCard, PricingPlan,
    QualityIndustryCard, ServiceCard, TechnologyCard, Testimonial,
};
pub use submission::{Submission, SubmissionKind, SubmissionReceipt, SubmissionSummary};
pub use validation::{ValidationError, ValidationErrors};
pub use wizard::{Wizard, WizardError, WizardForm};
