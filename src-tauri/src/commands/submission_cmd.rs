//! Tauri Commands for Intake Submissions
//!
//! Each public form is validated again here, its attachments copied into
//! app storage, and the whole thing stored in one transaction.

use site_content::{
    ApiError, ContactForm, FreelancerRegistration, GetStarted, HireUsRequest, QuoteRequest,
    Submission, SubmissionKind, SubmissionReceipt, SubmissionSummary,
};
use tauri::State;

use super::respond;
use crate::domain::{DomainError, DomainResult, StoredSubmission};
use crate::repository::Repository;
use crate::AppState;

async fn store_submission(state: &AppState, submission: Submission) -> DomainResult<SubmissionReceipt> {
    let limits = state.config.attachment_limits();
    submission.validate(limits).into_result()?;

    let mut stored = StoredSubmission::new(submission, chrono::Utc::now().to_rfc3339());
    stored.attachments = state
        .attachments
        .store_all(stored.submission.attachments(), limits)
        .await?;

    let created = state.submissions.create(&stored).await?;
    log::info!(
        "stored {} submission {} with {} attachment(s)",
        created.submission.kind(),
        created.id,
        created.attachments.len()
    );
    Ok(created.receipt())
}

#[tauri::command]
pub async fn submit_contact(
    state: State<'_, AppState>,
    form: ContactForm,
) -> Result<SubmissionReceipt, ApiError> {
    respond(
        "submit_contact",
        store_submission(&state, Submission::Contact(form)).await,
    )
}

#[tauri::command]
pub async fn submit_quote(
    state: State<'_, AppState>,
    form: QuoteRequest,
) -> Result<SubmissionReceipt, ApiError> {
    respond(
        "submit_quote",
        store_submission(&state, Submission::Quote(form)).await,
    )
}

#[tauri::command]
pub async fn submit_hire_us(
    state: State<'_, AppState>,
    form: HireUsRequest,
) -> Result<SubmissionReceipt, ApiError> {
    respond(
        "submit_hire_us",
        store_submission(&state, Submission::HireUs(form)).await,
    )
}

#[tauri::command]
pub async fn submit_freelancer(
    state: State<'_, AppState>,
    form: FreelancerRegistration,
) -> Result<SubmissionReceipt, ApiError> {
    respond(
        "submit_freelancer",
        store_submission(&state, Submission::Freelancer(form)).await,
    )
}

#[tauri::command]
pub async fn submit_get_started(
    state: State<'_, AppState>,
    form: GetStarted,
) -> Result<SubmissionReceipt, ApiError> {
    respond(
        "submit_get_started",
        store_submission(&state, Submission::GetStarted(form)).await,
    )
}

/// Admin listing, newest first
#[tauri::command]
pub async fn list_submissions(
    state: State<'_, AppState>,
    kind: Option<SubmissionKind>,
) -> Result<Vec<SubmissionSummary>, ApiError> {
    let listed = state.submissions.list_by_kind(kind).await;
    respond(
        "list_submissions",
        listed.map(|all| all.iter().map(StoredSubmission::summary).collect()),
    )
}

#[tauri::command]
pub async fn get_submission(
    state: State<'_, AppState>,
    id: i64,
) -> Result<StoredSubmission, ApiError> {
    let found = state.submissions.find_by_id(id).await.and_then(|found| {
        found.ok_or_else(|| DomainError::NotFound(format!("submission {}", id)))
    });
    respond("get_submission", found)
}

#[tauri::command]
pub async fn delete_submission(state: State<'_, AppState>, id: i64) -> Result<(), ApiError> {
    respond("delete_submission", state.submissions.delete(id).await)
}
