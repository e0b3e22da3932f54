//! Dashboard Tab Bar Component
//!
//! Tab bar for switching between the dashboard areas.

use leptos::prelude::*;

use crate::models::DashboardTab;

#[component]
pub fn DashboardTabBar(
    current_tab: ReadSignal<DashboardTab>,
    set_current_tab: WriteSignal<DashboardTab>,
) -> impl IntoView {
    view! {
        <nav class="dashboard-tab-bar">
            {DashboardTab::ALL
                .into_iter()
                .map(|tab| {
                    let tab_class = move || {
                        if current_tab.get() == tab { "dashboard-tab active" } else { "dashboard-tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| set_current_tab.set(tab)>
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
