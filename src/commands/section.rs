//! Section Commands
//!
//! Frontend bindings for homepage section reads and full-replace saves,
//! plus the `SectionClient` implementations the collection editor uses.

use std::marker::PhantomData;

use async_trait::async_trait;
use leptos::prelude::*;
use serde::Serialize;
use site_content::{
    ApiError, DigitalHeader, DigitalService, HomePage, ListSection, QualityDigitalSection,
    SectionClient, SectionKind, SectionPayload,
};
use wasm_bindgen::prelude::*;

use super::{call, call_with};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HomeArgs {
    resolve_images: bool,
}

#[derive(Serialize)]
struct SectionArgs {
    section: SectionKind,
}

#[derive(Serialize)]
struct PayloadArgs<'a> {
    payload: &'a SectionPayload,
}

#[derive(Serialize)]
struct DigitalArgs<'a> {
    section: &'a QualityDigitalSection,
}

// ========================
// Commands
// ========================

/// Aggregated homepage; editors ask for stored image paths, previews for resolved URLs
pub async fn get_home_page(resolve_images: bool) -> Result<HomePage, ApiError> {
    call_with("get_home_page", &HomeArgs { resolve_images }).await
}

pub async fn get_section(section: SectionKind) -> Result<SectionPayload, ApiError> {
    call_with("get_section", &SectionArgs { section }).await
}

pub async fn save_section(payload: &SectionPayload) -> Result<SectionPayload, ApiError> {
    call_with("save_section", &PayloadArgs { payload }).await
}

pub async fn get_quality_digital() -> Result<QualityDigitalSection, ApiError> {
    call("get_quality_digital", JsValue::NULL).await
}

pub async fn save_quality_digital(
    section: &QualityDigitalSection,
) -> Result<QualityDigitalSection, ApiError> {
    call_with("save_quality_digital", &DigitalArgs { section }).await
}

// ========================
// Section Clients
// ========================

fn wrong_section(expected: SectionKind, got: &SectionPayload) -> ApiError {
    ApiError::Server(format!("expected {}, received {}", expected, got.kind()))
}

/// Client for any plain list section
pub struct TauriSectionClient<T> {
    _record: PhantomData<fn() -> T>,
}

impl<T> TauriSectionClient<T> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<T> Clone for TauriSectionClient<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for TauriSectionClient<T> {}

#[async_trait(?Send)]
impl<T: ListSection> SectionClient<T> for TauriSectionClient<T> {
    async fn load(&self) -> Result<Vec<T>, ApiError> {
        let payload = get_section(T::SECTION).await?;
        let err = wrong_section(T::SECTION, &payload);
        T::unwrap(payload).ok_or(err)
    }

    async fn replace_all(&self, items: &[T]) -> Result<Vec<T>, ApiError> {
        let stored = save_section(&T::wrap(items.to_vec())).await?;
        let err = wrong_section(T::SECTION, &stored);
        T::unwrap(stored).ok_or(err)
    }
}

/// Client for the digital services list; the heading block travels with every save
#[derive(Clone, Copy)]
pub struct QualityDigitalClient {
    pub header: RwSignal<DigitalHeader>,
}

#[async_trait(?Send)]
impl SectionClient<DigitalService> for QualityDigitalClient {
    async fn load(&self) -> Result<Vec<DigitalService>, ApiError> {
        let section = get_quality_digital().await?;
        self.header.set(section.header());
        Ok(section.services)
    }

    async fn replace_all(&self, items: &[DigitalService]) -> Result<Vec<DigitalService>, ApiError> {
        let composite =
            QualityDigitalSection::from_parts(self.header.get_untracked(), items.to_vec());
        let stored = save_quality_digital(&composite).await?;
        self.header.set(stored.header());
        Ok(stored.services)
    }
}
