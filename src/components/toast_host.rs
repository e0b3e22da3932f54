//! Toast Host Component
//!
//! Renders the transient notifications queued on `AppContext`.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::ToastLevel;

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toast-host">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.level {
                        ToastLevel::Info => "toast toast-info",
                        ToastLevel::Error => "toast toast-error",
                    };
                    view! {
                        <div class=class on:click=move |_| ctx.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
