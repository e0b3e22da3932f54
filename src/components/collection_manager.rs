//! Collection Manager
//!
//! Generic editor for one ordered section: rows with inline fields, add,
//! delete, drag-reorder and a whole-collection save. Only the save talks to
//! the backend. Every section manager is this view over a different record
//! type.

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{
    bind_global_mouseup, create_dnd_signals, make_on_item_mouseenter, make_on_mousedown,
    make_on_mouseleave, make_on_slot_mouseenter, DndSignals, DropTarget,
};
use site_content::{
    ApiError, CollectionError, OrderedCollection, SaveOutcome, SectionClient, SectionRecord,
    ValidationErrors,
};

use crate::components::{DeleteConfirmButton, FieldInput};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

/// Inline errors keyed by `items[i].field`
type FieldErrors = BTreeMap<String, String>;

fn field_key(index: usize, field: &str) -> String {
    format!("items[{}].{}", index, field)
}

fn errors_by_field(errors: &ValidationErrors) -> FieldErrors {
    let mut by_field = FieldErrors::new();
    for error in errors.iter() {
        by_field
            .entry(error.field.clone())
            .or_insert_with(|| error.message.clone());
    }
    by_field
}

/// Editor for the collection held in `collection`.
///
/// `client` persists the section; `on_persisted` receives what the backend
/// holds after the latest save succeeds.
pub fn collection_manager<T, C>(
    collection: RwSignal<OrderedCollection<T>>,
    client: C,
    on_persisted: Callback<Vec<T>>,
) -> impl IntoView
where
    T: SectionRecord,
    C: SectionClient<T> + Copy + Send + Sync + 'static,
{
    let ctx = use_app_context();
    let store = use_app_store();
    let field_errors = RwSignal::new(FieldErrors::new());
    let image_base = Signal::derive(move || store.config().get().image_base_url);
    let label = T::SECTION.label();

    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |from, to| {
        web_sys::console::log_1(&format!("[DND] {}: move {} -> {}", T::SECTION, from, to).into());
        if let Some(Err(err)) = collection.try_update(|c| c.reorder(from, to)) {
            web_sys::console::warn_1(&format!("[DND] reorder rejected: {}", err).into());
        }
        // errors are keyed by position, which just changed
        field_errors.try_set(FieldErrors::new());
    });

    let on_add = move |_| {
        collection.update(|c| {
            c.add();
        });
    };

    let on_save = move |_| {
        let ticket = match collection.try_update(|c| c.begin_save()) {
            Some(Ok(ticket)) => ticket,
            Some(Err(CollectionError::Invalid(errors))) => {
                field_errors.set(errors_by_field(&errors));
                ctx.warn(format!("{}: fix the highlighted fields before saving", label));
                return;
            }
            Some(Err(err)) => {
                ctx.warn(err.to_string());
                return;
            }
            None => return,
        };
        field_errors.set(FieldErrors::new());
        web_sys::console::log_1(
            &format!(
                "[SAVE] {}: sending {} records (save #{})",
                T::SECTION,
                ticket.items.len(),
                ticket.generation
            )
            .into(),
        );

        spawn_local(async move {
            let outcome = client.replace_all(&ticket.items).await;
            match collection.try_update(|c| c.finish_save(ticket.generation, outcome)) {
                Some(Ok(SaveOutcome::Adopted)) => {
                    let stored = collection.with_untracked(|c| c.items().to_vec());
                    on_persisted.run(stored);
                    ctx.notify(format!("{} saved", label));
                }
                Some(Ok(SaveOutcome::Superseded)) => {
                    web_sys::console::log_1(
                        &format!("[SAVE] {}: save #{} superseded", T::SECTION, ticket.generation)
                            .into(),
                    );
                }
                Some(Err(CollectionError::Api(err))) => {
                    if let ApiError::Validation(errors) = &err {
                        field_errors.try_set(errors_by_field(errors));
                    }
                    ctx.report(&format!("Saving {}", label), &err);
                }
                Some(Err(err)) => ctx.warn(err.to_string()),
                // editor was closed while the save was in flight
                None => {}
            }
        });
    };

    // local until the next save replaces the section
    let remove = move |index: usize| {
        if let Some(Err(err)) = collection.try_update(|c| c.remove(index).map(|_| ())) {
            web_sys::console::warn_1(&format!("[EDIT] {}: {}", T::SECTION, err).into());
        }
        field_errors.set(FieldErrors::new());
    };

    let row_count = move || collection.with(|c| c.len());

    view! {
        <section class="collection-manager">
            <header class="collection-toolbar">
                <h2>{label}</h2>
                <span class="collection-count">{move || format!("{} items", row_count())}</span>
                <Show when=move || collection.with(|c| c.is_saving())>
                    <span class="saving-indicator">"Saving…"</span>
                </Show>
                <button class="add-btn" on:click=on_add>"+ Add"</button>
                <button class="save-btn" on:click=on_save>"Save"</button>
            </header>
            {move || {
                collection
                    .with(|c| c.last_error().map(str::to_string))
                    .map(|message| view! { <p class="collection-error">{message}</p> })
            }}
            <Show when=move || row_count() == 0>
                <p class="collection-empty">"No items yet."</p>
            </Show>
            <ul class="collection-rows">
                <DropSlot dnd=dnd slot=0 />
                <For
                    each=move || 0..row_count()
                    key=|index| *index
                    children=move |index| {
                        collection_row(collection, dnd, index, field_errors, image_base, remove)
                    }
                />
            </ul>
        </section>
    }
}

fn collection_row<T, R>(
    collection: RwSignal<OrderedCollection<T>>,
    dnd: DndSignals,
    index: usize,
    field_errors: RwSignal<FieldErrors>,
    image_base: Signal<String>,
    remove: R,
) -> impl IntoView
where
    T: SectionRecord,
    R: Fn(usize) + Copy + Send + Sync + 'static,
{
    let (expanded, set_expanded) = signal(false);

    let caption = move || {
        collection.with(|c| c.get(index).map(|item| item.caption()).unwrap_or_default())
    };
    let has_errors = move || {
        let prefix = format!("items[{}].", index);
        field_errors.with(|errors| errors.keys().any(|key| key.starts_with(&prefix)))
    };
    let row_class = move || {
        let mut c = String::from("collection-row");
        if dnd.is_dragging(index) {
            c.push_str(" dragging");
        }
        if dnd.is_target(DropTarget::Item(index)) {
            c.push_str(" drop-target");
        }
        if has_errors() {
            c.push_str(" invalid");
        }
        c
    };

    let fields = T::fields()
        .iter()
        .copied()
        .map(|spec| {
            let value = Signal::derive(move || {
                collection.with(|c| {
                    c.get(index)
                        .and_then(|item| item.field(spec.name))
                        .unwrap_or_default()
                })
            });
            let key = field_key(index, spec.name);
            let error = Signal::derive(move || field_errors.with(|errors| errors.get(&key).cloned()));
            let on_input = Callback::new(move |raw: String| {
                let key = field_key(index, spec.name);
                match collection.try_update(|c| c.update(index, spec.name, &raw)) {
                    Some(Err(err)) => field_errors.update(|errors| {
                        errors.insert(key, err.to_string());
                    }),
                    _ => {
                        if field_errors.with_untracked(|errors| errors.contains_key(&key)) {
                            field_errors.update(|errors| {
                                errors.remove(&key);
                            });
                        }
                    }
                }
            });
            view! {
                <FieldInput
                    spec=spec
                    value=value
                    error=error
                    image_base=image_base
                    on_input=on_input
                />
            }
        })
        .collect_view();

    view! {
        <li
            class=row_class
            on:mouseenter=make_on_item_mouseenter(dnd, index)
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <div class="row-header" on:mousedown=make_on_mousedown(dnd, index)>
                <span class="drag-handle" title="Drag to reorder">"⠿"</span>
                <span class="row-position">{index + 1}</span>
                <span class="row-caption">{caption}</span>
                <button
                    class="row-toggle"
                    on:click=move |_| set_expanded.update(|open| *open = !*open)
                >
                    {move || if expanded.get() { "Close" } else { "Edit" }}
                </button>
                <DeleteConfirmButton
                    button_class="row-delete-btn"
                    subject=Signal::derive(caption)
                    until_saved=true
                    on_confirm=Callback::new(move |_| remove(index))
                />
            </div>
            <div class="row-fields" class:hidden=move || !expanded.get()>
                {fields}
            </div>
        </li>
        <DropSlot dnd=dnd slot={index + 1} />
    }
}

/// Gap between rows that accepts a drop; hidden unless a drag is active
#[component]
pub fn DropSlot(dnd: DndSignals, slot: usize) -> impl IntoView {
    let slot_class = move || {
        let mut c = String::from("drop-slot");
        if dnd.dragging_read.get().is_none() {
            c.push_str(" hidden");
        }
        if dnd.is_target(DropTarget::Slot(slot)) {
            c.push_str(" active");
        }
        c
    };

    view! {
        <li
            class=slot_class
            on:mouseenter=make_on_slot_mouseenter(dnd, slot)
            on:mouseleave=make_on_mouseleave(dnd)
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_grouped_by_field_keep_first_message() {
        let mut errors = ValidationErrors::new();
        errors.push("items[0].title", "is required");
        errors.push("items[0].title", "second message");
        errors.push("items[2].description", "is required");

        let by_field = errors_by_field(&errors);
        assert_eq!(by_field.len(), 2);
        assert_eq!(by_field[&field_key(0, "title")], "is required");
        assert!(by_field.contains_key(&field_key(2, "description")));
    }
}
