//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain. Every
//! wrapper resolves to `Result<T, ApiError>`; backend errors arrive already
//! tagged, anything else is treated as a transport failure.

mod dialog;
mod document;
mod section;
mod submission;
mod system;

use serde::de::DeserializeOwned;
use serde::Serialize;
use site_content::ApiError;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use dialog::*;
pub use document::*;
pub use section::*;
pub use submission::*;
pub use system::*;

fn to_args<A: Serialize>(cmd: &str, args: &A) -> Result<JsValue, ApiError> {
    serde_wasm_bindgen::to_value(args)
        .map_err(|e| ApiError::Network(format!("{}: cannot encode arguments: {}", cmd, e)))
}

/// Rejections carry a serialized `ApiError`; plain strings come from the IPC layer itself
fn decode_rejection(cmd: &str, err: JsValue) -> ApiError {
    if let Ok(api) = serde_wasm_bindgen::from_value::<ApiError>(err.clone()) {
        return api;
    }
    let detail = err
        .as_string()
        .unwrap_or_else(|| format!("{} was rejected", cmd));
    ApiError::Network(detail)
}

async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, ApiError> {
    match invoke(cmd, args).await {
        Ok(value) => serde_wasm_bindgen::from_value(value)
            .map_err(|e| ApiError::Network(format!("{}: unexpected response: {}", cmd, e))),
        Err(err) => {
            let api = decode_rejection(cmd, err);
            web_sys::console::error_1(&format!("[IPC] {} failed: {}", cmd, api).into());
            Err(api)
        }
    }
}

async fn call_with<A: Serialize, T: DeserializeOwned>(cmd: &str, args: &A) -> Result<T, ApiError> {
    let js_args = to_args(cmd, args)?;
    call(cmd, js_args).await
}
