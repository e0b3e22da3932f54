//! Tauri Commands for configuration and diagnostics

use site_content::ApiError;
use tauri::State;

use crate::config::PublicConfig;
use crate::AppState;

const DEFAULT_LOG_LINES: usize = 200;

#[tauri::command]
pub fn get_site_config(state: State<'_, AppState>) -> Result<PublicConfig, ApiError> {
    Ok(state.config.public())
}

/// Tail of the rolling log, oldest first
#[tauri::command]
pub fn recent_logs(limit: Option<usize>) -> Vec<String> {
    rolling_logger::recent_lines(limit.unwrap_or(DEFAULT_LOG_LINES))
}
