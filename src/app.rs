//! PLS Site Admin Frontend App
//!
//! Dashboard shell: tab bar, the active area, and toasts.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{
    DashboardTabBar, IntakeDashboard, LogViewer, SectionsDashboard, SubmissionsInbox, ToastHost,
};
use crate::context::AppContext;
use crate::models::DashboardTab;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (current_tab, set_current_tab) = signal(DashboardTab::Sections);

    // Provide context to all children
    let ctx = AppContext::new((reload_trigger, set_reload_trigger));
    provide_context(ctx);
    let store = Store::new(AppState::default());
    provide_context(store);

    // Config once on mount
    spawn_local(async move {
        match commands::get_site_config().await {
            Ok(config) => store.config().set(config),
            Err(err) => ctx.report("Loading configuration", &err),
        }
    });

    // Homepage document on mount and on every reload request
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading homepage, trigger={}", trigger).into());
        spawn_local(async move {
            // editors want stored paths, not resolved URLs
            match commands::get_home_page(false).await {
                Ok(home) => {
                    store.home().set(home);
                    store.home_version().update(|v| *v += 1);
                    store.loaded().set(true);
                }
                Err(err) => ctx.report("Loading homepage", &err),
            }
        });
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"PLS Site Admin"</h1>
                <DashboardTabBar current_tab=current_tab set_current_tab=set_current_tab />
                <button class="reload-btn" title="Discard unsaved edits and reload" on:click=move |_| ctx.reload()>
                    "Reload"
                </button>
            </header>
            <main class="main-content">
                <Show
                    when=move || store.loaded().get()
                    fallback=|| view! { <p class="loading">"Loading…"</p> }
                >
                    {move || match current_tab.get() {
                        DashboardTab::Sections => view! { <SectionsDashboard /> }.into_any(),
                        DashboardTab::Intake => view! { <IntakeDashboard /> }.into_any(),
                        DashboardTab::Inbox => view! { <SubmissionsInbox /> }.into_any(),
                        DashboardTab::Diagnostics => view! { <LogViewer /> }.into_any(),
                    }}
                </Show>
            </main>
            <ToastHost />
        </div>
    }
}
