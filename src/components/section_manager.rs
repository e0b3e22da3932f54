//! Section Managers
//!
//! Homepage editing area: a section list on the left and the editor for the
//! selected section on the right. Editors seed from the aggregated homepage
//! document in the store and reseed whenever it is reloaded.

use leptos::prelude::*;
use site_content::{
    BlogPostCard, DigitalHeader, DigitalService, HeroSlide, IndustryCard, ItCard, ListSection,
    OrderedCollection, PricingPlan, QualityDigitalSection, QualityIndustryCard, SectionKind,
    SectionPayload, ServiceCard, TechnologyCard, Testimonial,
};

use crate::commands::{QualityDigitalClient, TauriSectionClient};
use crate::components::collection_manager::collection_manager;
use crate::components::{PlsAdvantageEditor, SectionImagesEditor};
use crate::store::{store_apply_section, use_app_store, AppStateStoreFields};

/// Sidebar entry for the singleton block, which is not a `SectionKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Section(SectionKind),
    PlsAdvantage,
}

impl Selection {
    fn label(&self) -> &'static str {
        match self {
            Selection::Section(kind) => kind.label(),
            Selection::PlsAdvantage => "PLS Advantage",
        }
    }
}

#[component]
pub fn SectionsDashboard() -> impl IntoView {
    let (selected, set_selected) = signal(Selection::Section(SectionKind::HeroSlides));

    let entries = SectionKind::ALL
        .into_iter()
        .map(Selection::Section)
        .chain(std::iter::once(Selection::PlsAdvantage))
        .map(|entry| {
            let entry_class = move || {
                if selected.get() == entry { "section-link active" } else { "section-link" }
            };
            view! {
                <li>
                    <button class=entry_class on:click=move |_| set_selected.set(entry)>
                        {entry.label()}
                    </button>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="sections-dashboard">
            <aside class="section-sidebar">
                <ul>{entries}</ul>
            </aside>
            <div class="section-editor">
                {move || match selected.get() {
                    Selection::Section(kind) => section_editor(kind),
                    Selection::PlsAdvantage => view! { <PlsAdvantageEditor /> }.into_any(),
                }}
            </div>
        </div>
    }
}

/// Editor for one section
pub fn section_editor(section: SectionKind) -> AnyView {
    match section {
        SectionKind::HeroSlides => list_section_manager::<HeroSlide>().into_any(),
        SectionKind::Services => list_section_manager::<ServiceCard>().into_any(),
        SectionKind::ItCards => list_section_manager::<ItCard>().into_any(),
        SectionKind::IndustryCards => list_section_manager::<IndustryCard>().into_any(),
        SectionKind::TechnologyCards => list_section_manager::<TechnologyCard>().into_any(),
        SectionKind::QualityIndustry => list_section_manager::<QualityIndustryCard>().into_any(),
        SectionKind::QualityDigital => quality_digital_manager().into_any(),
        SectionKind::Testimonials => list_section_manager::<Testimonial>().into_any(),
        SectionKind::Pricing => list_section_manager::<PricingPlan>().into_any(),
        SectionKind::BlogPosts => list_section_manager::<BlogPostCard>().into_any(),
    }
}

fn list_section_manager<T: ListSection>() -> impl IntoView {
    let store = use_app_store();
    let collection = RwSignal::new(OrderedCollection::new(
        store.home().with_untracked(|home| T::from_home(home)),
    ));

    Effect::new(move |_| {
        let _ = store.home_version().get();
        let seeded = store.home().with_untracked(|home| T::from_home(home));
        collection.set(OrderedCollection::new(seeded));
    });

    let on_persisted = Callback::new(move |items: Vec<T>| {
        store_apply_section(&store, T::wrap(items));
    });

    view! {
        {collection_manager(collection, TauriSectionClient::<T>::new(), on_persisted)}
        {T::SECTION
            .has_image_pair()
            .then(|| view! { <SectionImagesEditor section={T::SECTION} /> })}
    }
}

fn quality_digital_manager() -> impl IntoView {
    let store = use_app_store();
    let seeded = store.home().with_untracked(|home| home.quality_digital.clone());
    let header = RwSignal::new(seeded.header());
    let collection = RwSignal::new(OrderedCollection::new(seeded.services));

    Effect::new(move |_| {
        let _ = store.home_version().get();
        let section = store.home().with_untracked(|home| home.quality_digital.clone());
        header.set(section.header());
        collection.set(OrderedCollection::new(section.services));
    });

    let on_persisted = Callback::new(move |services: Vec<DigitalService>| {
        let section = QualityDigitalSection::from_parts(header.get_untracked(), services);
        store_apply_section(&store, SectionPayload::QualityDigital(section));
    });

    view! {
        <section class="digital-header">
            <h3>"Heading block"</h3>
            {header_input(header, "Heading", |h| h.heading.clone(), |h, v| h.heading = v)}
            {header_input(header, "Subheading", |h| h.subheading.clone(), |h, v| h.subheading = v)}
            <label class="field">
                <span class="field-label">"Images (one per line)"</span>
                <textarea
                    class="field-control"
                    rows=3
                    prop:value=move || header.with(|h| h.images.join("\n"))
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        header.update(|h| {
                            h.images = raw
                                .lines()
                                .map(str::trim)
                                .filter(|line| !line.is_empty())
                                .map(str::to_string)
                                .collect();
                        });
                    }
                />
            </label>
            <p class="hint">"Saved together with the services below."</p>
        </section>
        {collection_manager(collection, QualityDigitalClient { header }, on_persisted)}
    }
}

fn header_input(
    header: RwSignal<DigitalHeader>,
    label: &'static str,
    get: fn(&DigitalHeader) -> String,
    set: fn(&mut DigitalHeader, String),
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type="text"
                class="field-control"
                prop:value=move || header.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    header.update(|h| set(h, value));
                }
            />
        </label>
    }
}
