//! Field Input Component
//!
//! One editable record field, rendered according to its `FieldKind`.

use leptos::prelude::*;
use site_content::{resolve_image_url, FieldKind, FieldSpec};

/// Input for a single record field
///
/// # Arguments
/// * `spec` - Static field description (name, label, kind)
/// * `value` - Current raw value
/// * `error` - Inline error for this field, if any
/// * `image_base` - Base URL used to preview image fields
/// * `on_input` - Receives the raw string on every edit
#[component]
pub fn FieldInput(
    spec: FieldSpec,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] image_base: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    let label = if spec.required {
        format!("{} *", spec.label)
    } else {
        spec.label.to_string()
    };

    let control = match spec.kind {
        FieldKind::LongText | FieldKind::Lines => {
            let (rows, placeholder) = if spec.kind == FieldKind::Lines {
                (4, "One entry per line")
            } else {
                (3, "")
            };
            // blank lines are dropped on parse; commit on blur
            if spec.kind == FieldKind::Lines {
                view! {
                    <textarea
                        class="field-control"
                        rows=rows
                        placeholder=placeholder
                        prop:value=move || value.get()
                        on:change=move |ev| on_input.run(event_target_value(&ev))
                    />
                }
                .into_any()
            } else {
                view! {
                    <textarea
                        class="field-control"
                        rows=rows
                        placeholder=placeholder
                        prop:value=move || value.get()
                        on:input=move |ev| on_input.run(event_target_value(&ev))
                    />
                }
                .into_any()
            }
        }
        FieldKind::Number => view! {
            <input
                type="number"
                class="field-control field-number"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any(),
        FieldKind::Toggle => view! {
            <input
                type="checkbox"
                class="field-toggle"
                prop:checked=move || value.get() == "true"
                on:change=move |ev| on_input.run(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldKind::ImageUrl => view! {
            <div class="field-image">
                <input
                    type="text"
                    class="field-control"
                    placeholder="images/example.png"
                    prop:value=move || value.get()
                    on:input=move |ev| on_input.run(event_target_value(&ev))
                />
                <Show when=move || !value.get().trim().is_empty()>
                    <img
                        class="field-image-preview"
                        src=move || resolve_image_url(&image_base.get(), &value.get())
                        alt=""
                    />
                </Show>
            </div>
        }
        .into_any(),
        FieldKind::Text | FieldKind::Icon | FieldKind::Link => {
            let input_type = if spec.kind == FieldKind::Link { "url" } else { "text" };
            view! {
                <input
                    type=input_type
                    class="field-control"
                    prop:value=move || value.get()
                    on:input=move |ev| on_input.run(event_target_value(&ev))
                />
            }
            .into_any()
        }
    };

    view! {
        <label class="field" class:field-invalid=move || error.get().is_some()>
            <span class="field-label">{label}</span>
            {control}
            {move || error.get().map(|message| view! { <span class="field-error">{message}</span> })}
        </label>
    }
}
