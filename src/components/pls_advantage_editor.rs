//! PLS Advantage Editor Component
//!
//! Singleton block: heading, description, bullet points and one image.

use leptos::prelude::*;
use leptos::task::spawn_local;
use site_content::{resolve_image_url, ApiError, ValidationErrors};

use crate::commands;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn PlsAdvantageEditor() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let advantage = RwSignal::new(store.home().with_untracked(|home| home.pls_advantage.clone()));
    let errors = RwSignal::new(ValidationErrors::new());
    let (saving, set_saving) = signal(false);

    Effect::new(move |_| {
        let _ = store.home_version().get();
        advantage.set(store.home().with_untracked(|home| home.pls_advantage.clone()));
        errors.set(ValidationErrors::new());
    });

    let error_for = move |field: &'static str| {
        move || {
            errors
                .with(|e| e.message_for(field).map(str::to_string))
                .map(|message| view! { <span class="field-error">{message}</span> })
        }
    };

    let on_save = move |_| {
        let current = advantage.get_untracked();
        if let Err(invalid) = current.validate() {
            errors.set(invalid);
            ctx.warn("PLS advantage: fix the highlighted fields before saving");
            return;
        }
        errors.set(ValidationErrors::new());
        set_saving.set(true);
        spawn_local(async move {
            match commands::save_pls_advantage(&current).await {
                Ok(saved) => {
                    advantage.try_set(saved.clone());
                    store.home().write().pls_advantage = saved;
                    ctx.notify("PLS advantage saved");
                }
                Err(err) => {
                    if let ApiError::Validation(invalid) = &err {
                        errors.try_set(invalid.clone());
                    }
                    ctx.report("Saving PLS advantage", &err);
                }
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <section class="pls-advantage-editor">
            <h2>"PLS Advantage"</h2>
            <label class="field">
                <span class="field-label">"Heading *"</span>
                <input
                    type="text"
                    class="field-control"
                    prop:value=move || advantage.with(|a| a.heading.clone())
                    on:input=move |ev| advantage.update(|a| a.heading = event_target_value(&ev))
                />
                {error_for("heading")}
            </label>
            <label class="field">
                <span class="field-label">"Description"</span>
                <textarea
                    class="field-control"
                    rows=4
                    prop:value=move || advantage.with(|a| a.description.clone())
                    on:input=move |ev| advantage.update(|a| a.description = event_target_value(&ev))
                />
            </label>
            <label class="field">
                <span class="field-label">"Points (one per line)"</span>
                <textarea
                    class="field-control"
                    rows=5
                    prop:value=move || advantage.with(|a| a.points.join("\n"))
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        advantage.update(|a| {
                            a.points = raw
                                .lines()
                                .map(str::trim)
                                .filter(|line| !line.is_empty())
                                .map(str::to_string)
                                .collect();
                        });
                    }
                />
            </label>
            <label class="field">
                <span class="field-label">"Image"</span>
                <input
                    type="text"
                    class="field-control"
                    prop:value=move || advantage.with(|a| a.image_url.clone())
                    on:input=move |ev| advantage.update(|a| a.image_url = event_target_value(&ev))
                />
                <img
                    class="field-image-preview"
                    src=move || {
                        let base = store.config().get().image_base_url;
                        advantage.with(|a| resolve_image_url(&base, &a.image_url))
                    }
                    alt=""
                />
            </label>
            <button class="save-btn" disabled=move || saving.get() on:click=on_save>
                {move || if saving.get() { "Saving…" } else { "Save" }}
            </button>
        </section>
    }
}
