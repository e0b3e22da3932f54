use site_content::{ApiError, AttachmentRef};
use wasm_bindgen::JsValue;

use super::call;

/// Native picker filtered to PDFs; an empty list means the user cancelled
pub async fn pick_attachments() -> Result<Vec<AttachmentRef>, ApiError> {
    call("pick_attachments", JsValue::NULL).await
}
