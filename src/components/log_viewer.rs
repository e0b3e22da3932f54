//! Log Viewer Component
//!
//! Tail of the backend's rolling log, for diagnosing failed saves.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;

const TAIL_LINES: usize = 200;

#[component]
pub fn LogViewer() -> impl IntoView {
    let ctx = use_app_context();
    let (lines, set_lines) = signal(Vec::<String>::new());
    let (refresh, set_refresh) = signal(0u32);
    let (fetched_at, set_fetched_at) = signal(String::new());

    Effect::new(move |_| {
        let _ = refresh.get();
        spawn_local(async move {
            match commands::recent_logs(Some(TAIL_LINES)).await {
                Ok(tail) => {
                    set_lines.set(tail);
                    set_fetched_at.set(String::from(js_sys::Date::new_0().to_locale_time_string("en-US")));
                }
                Err(err) => ctx.report("Reading logs", &err),
            }
        });
    });

    view! {
        <section class="log-viewer">
            <div class="log-toolbar">
                <span>
                    {move || format!("Last {} lines, fetched {}", lines.with(|l| l.len()), fetched_at.get())}
                </span>
                <button on:click=move |_| set_refresh.update(|n| *n += 1)>"Refresh"</button>
            </div>
            <pre class="log-lines">{move || lines.get().join("\n")}</pre>
        </section>
    }
}
