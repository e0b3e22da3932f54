//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use site_content::{HomePage, SectionPayload, SubmissionSummary};

use crate::models::SiteConfigView;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Aggregated homepage document with stored (unresolved) image paths
    pub home: HomePage,
    /// True once the first homepage load finished
    pub loaded: bool,
    /// Bumped on every full homepage load; editors reseed when it changes
    pub home_version: u32,
    pub config: SiteConfigView,
    /// Inbox listing, newest first
    pub submissions: Vec<SubmissionSummary>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Fold a saved section back into the homepage document
pub fn store_apply_section(store: &AppStore, payload: SectionPayload) {
    payload.apply_to(&mut store.home().write());
}

/// Remove a submission from the inbox listing by ID
pub fn store_remove_submission(store: &AppStore, id: i64) {
    store.submissions().write().retain(|s| s.id != id);
}
