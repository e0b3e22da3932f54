//! Tauri Commands for Singleton Documents

use site_content::{ApiError, PlsAdvantage, SectionImages, SectionKind};
use tauri::State;

use super::respond;
use crate::AppState;

#[tauri::command]
pub async fn get_section_images(
    state: State<'_, AppState>,
    section: SectionKind,
) -> Result<SectionImages, ApiError> {
    respond(
        "get_section_images",
        state.documents.section_images(section).await,
    )
}

#[tauri::command]
pub async fn save_section_images(
    state: State<'_, AppState>,
    section: SectionKind,
    images: SectionImages,
) -> Result<SectionImages, ApiError> {
    respond(
        "save_section_images",
        state.documents.save_section_images(section, &images).await,
    )
}

#[tauri::command]
pub async fn get_pls_advantage(state: State<'_, AppState>) -> Result<PlsAdvantage, ApiError> {
    respond("get_pls_advantage", state.documents.pls_advantage().await)
}

#[tauri::command]
pub async fn save_pls_advantage(
    state: State<'_, AppState>,
    advantage: PlsAdvantage,
) -> Result<PlsAdvantage, ApiError> {
    respond(
        "save_pls_advantage",
        state.documents.save_pls_advantage(&advantage).await,
    )
}
