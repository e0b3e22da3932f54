//! Tauri Commands for Homepage Sections
//!
//! Reads and full-replace saves of the ordered sections.

use site_content::{
    resolve_image_url, ApiError, HomePage, QualityDigitalSection, SectionKind, SectionPayload,
};
use tauri::State;

use super::respond;
use crate::domain::DomainError;
use crate::AppState;

/// The aggregated homepage document.
///
/// Image references are joined onto the configured base URL unless
/// `resolve_images` is false (the admin editors want stored values).
#[tauri::command]
pub async fn get_home_page(
    state: State<'_, AppState>,
    resolve_images: Option<bool>,
) -> Result<HomePage, ApiError> {
    let mut home = respond("get_home_page", state.home.load().await)?;
    if resolve_images.unwrap_or(true) {
        let base = state.config.image_base_url.clone();
        home.map_images(&|path: &str| resolve_image_url(&base, path));
    }
    Ok(home)
}

#[tauri::command]
pub async fn get_section(
    state: State<'_, AppState>,
    section: SectionKind,
) -> Result<SectionPayload, ApiError> {
    respond("get_section", state.sections.load(section).await)
}

/// Replace a whole section and return what was stored
#[tauri::command]
pub async fn save_section(
    state: State<'_, AppState>,
    payload: SectionPayload,
) -> Result<SectionPayload, ApiError> {
    respond("save_section", state.sections.replace_all(payload).await)
}

#[tauri::command]
pub async fn delete_section_item(
    state: State<'_, AppState>,
    section: SectionKind,
    id: String,
) -> Result<(), ApiError> {
    respond(
        "delete_section_item",
        state.sections.delete_item(section, &id).await,
    )
}

fn expect_digital(payload: SectionPayload) -> Result<QualityDigitalSection, DomainError> {
    match payload {
        SectionPayload::QualityDigital(section) => Ok(section),
        other => Err(DomainError::Internal(format!(
            "expected quality-digital, loaded {}",
            other.kind()
        ))),
    }
}

#[tauri::command]
pub async fn get_quality_digital(
    state: State<'_, AppState>,
) -> Result<QualityDigitalSection, ApiError> {
    let loaded = state.sections.load(SectionKind::QualityDigital).await;
    respond("get_quality_digital", loaded.and_then(expect_digital))
}

#[tauri::command]
pub async fn save_quality_digital(
    state: State<'_, AppState>,
    section: QualityDigitalSection,
) -> Result<QualityDigitalSection, ApiError> {
    let saved = state
        .sections
        .replace_all(SectionPayload::QualityDigital(section))
        .await;
    respond("save_quality_digital", saved.and_then(expect_digital))
}

#[tauri::command]
pub async fn delete_digital_service(
    state: State<'_, AppState>,
    id: String,
) -> Result<(), ApiError> {
    respond(
        "delete_digital_service",
        state
            .sections
            .delete_item(SectionKind::QualityDigital, &id)
            .await,
    )
}
