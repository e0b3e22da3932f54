//! Submission Commands
//!
//! Public intake forms and the admin inbox.

use serde::Serialize;
use site_content::{
    ApiError, ContactForm, FreelancerRegistration, GetStarted, HireUsRequest, QuoteRequest,
    SubmissionKind, SubmissionReceipt, SubmissionSummary,
};

use super::call_with;
use crate::models::SubmissionDetail;

#[derive(Serialize)]
struct FormArgs<'a, F> {
    form: &'a F,
}

#[derive(Serialize)]
struct KindArgs {
    kind: Option<SubmissionKind>,
}

#[derive(Serialize)]
struct IdArgs {
    id: i64,
}

pub async fn submit_contact(form: &ContactForm) -> Result<SubmissionReceipt, ApiError> {
    call_with("submit_contact", &FormArgs { form }).await
}

pub async fn submit_quote(form: &QuoteRequest) -> Result<SubmissionReceipt, ApiError> {
    call_with("submit_quote", &FormArgs { form }).await
}

pub async fn submit_hire_us(form: &HireUsRequest) -> Result<SubmissionReceipt, ApiError> {
    call_with("submit_hire_us", &FormArgs { form }).await
}

pub async fn submit_freelancer(
    form: &FreelancerRegistration,
) -> Result<SubmissionReceipt, ApiError> {
    call_with("submit_freelancer", &FormArgs { form }).await
}

pub async fn submit_get_started(form: &GetStarted) -> Result<SubmissionReceipt, ApiError> {
    call_with("submit_get_started", &FormArgs { form }).await
}

/// Newest first; `None` lists every kind
pub async fn list_submissions(
    kind: Option<SubmissionKind>,
) -> Result<Vec<SubmissionSummary>, ApiError> {
    call_with("list_submissions", &KindArgs { kind }).await
}

pub async fn get_submission(id: i64) -> Result<SubmissionDetail, ApiError> {
    call_with("get_submission", &IdArgs { id }).await
}

pub async fn delete_submission(id: i64) -> Result<(), ApiError> {
    call_with("delete_submission", &IdArgs { id }).await
}
