//! Section Images Editor Component
//!
//! Top/bottom decorative image pair for sections that carry one.

use leptos::prelude::*;
use leptos::task::spawn_local;
use site_content::{resolve_image_url, SectionKind};

use crate::commands;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn SectionImagesEditor(section: SectionKind) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let images = RwSignal::new(store.home().with_untracked(|home| home.images_for(section)));
    let (saving, set_saving) = signal(false);

    Effect::new(move |_| {
        let _ = store.home_version().get();
        images.set(store.home().with_untracked(|home| home.images_for(section)));
    });

    let preview = move |path: String| {
        let base = store.config().get().image_base_url;
        resolve_image_url(&base, &path)
    };

    let on_save = move |_| {
        let current = images.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            match commands::save_section_images(section, &current).await {
                Ok(saved) => {
                    images.try_set(saved.clone());
                    store.home().write().set_images(section, saved);
                    ctx.notify(format!("{} images saved", section.label()));
                }
                Err(err) => ctx.report(&format!("Saving {} images", section.label()), &err),
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <section class="section-images-editor">
            <h3>"Section images"</h3>
            <div class="image-pair">
                <label class="field">
                    <span class="field-label">"Top image"</span>
                    <input
                        type="text"
                        class="field-control"
                        prop:value=move || images.with(|i| i.top_image.clone())
                        on:input=move |ev| images.update(|i| i.top_image = event_target_value(&ev))
                    />
                    <img
                        class="field-image-preview"
                        src=move || preview(images.with(|i| i.top_image.clone()))
                        alt=""
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Bottom image"</span>
                    <input
                        type="text"
                        class="field-control"
                        prop:value=move || images.with(|i| i.bottom_image.clone())
                        on:input=move |ev| images.update(|i| i.bottom_image = event_target_value(&ev))
                    />
                    <img
                        class="field-image-preview"
                        src=move || preview(images.with(|i| i.bottom_image.clone()))
                        alt=""
                    />
                </label>
            </div>
            <button class="save-btn" disabled=move || saving.get() on:click=on_save>
                {move || if saving.get() { "Saving…" } else { "Save images" }}
            </button>
        </section>
    }
}

