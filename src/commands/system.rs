use serde::Serialize;
use site_content::ApiError;
use wasm_bindgen::JsValue;

use super::{call, call_with};
use crate::models::SiteConfigView;

#[derive(Serialize)]
struct LogArgs {
    limit: Option<usize>,
}

pub async fn get_site_config() -> Result<SiteConfigView, ApiError> {
    call("get_site_config", JsValue::NULL).await
}

pub async fn recent_logs(limit: Option<usize>) -> Result<Vec<String>, ApiError> {
    call_with("recent_logs", &LogArgs { limit }).await
}
