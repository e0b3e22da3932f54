//! Document Commands
//!
//! Singleton documents: the per-section image pairs and the PLS advantage block.

use serde::Serialize;
use site_content::{ApiError, PlsAdvantage, SectionImages, SectionKind};

use super::{call, call_with};
use wasm_bindgen::JsValue;

#[derive(Serialize)]
struct SectionArgs {
    section: SectionKind,
}

#[derive(Serialize)]
struct SaveImagesArgs<'a> {
    section: SectionKind,
    images: &'a SectionImages,
}

#[derive(Serialize)]
struct AdvantageArgs<'a> {
    advantage: &'a PlsAdvantage,
}

pub async fn get_section_images(section: SectionKind) -> Result<SectionImages, ApiError> {
    call_with("get_section_images", &SectionArgs { section }).await
}

pub async fn save_section_images(
    section: SectionKind,
    images: &SectionImages,
) -> Result<SectionImages, ApiError> {
    call_with("save_section_images", &SaveImagesArgs { section, images }).await
}

pub async fn get_pls_advantage() -> Result<PlsAdvantage, ApiError> {
    call("get_pls_advantage", JsValue::NULL).await
}

pub async fn save_pls_advantage(advantage: &PlsAdvantage) -> Result<PlsAdvantage, ApiError> {
    call_with("save_pls_advantage", &AdvantageArgs { advantage }).await
}
