//! Wizard Shell
//!
//! Step indicator, step body and Back/Next/Submit navigation around a
//! `Wizard<F>` held in a signal. Step bodies edit the form through
//! `WizardHandle`, which turns input events into typed update messages.

use leptos::prelude::*;
use site_content::{Wizard, WizardForm};

use crate::context::use_app_context;

/// Wizard state plus whether the active step has been edited yet
pub struct WizardHandle<F: WizardForm + Send + Sync + 'static> {
    pub wizard: RwSignal<Wizard<F>>,
    /// Errors stay hidden until the user edits the active step
    pub touched: RwSignal<bool>,
}

impl<F: WizardForm + Send + Sync + 'static> Clone for WizardHandle<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: WizardForm + Send + Sync + 'static> Copy for WizardHandle<F> {}

impl<F: WizardForm + Send + Sync + 'static> WizardHandle<F> {
    pub fn new() -> Self {
        Self {
            wizard: RwSignal::new(Wizard::new()),
            touched: RwSignal::new(false),
        }
    }

    /// Current value read out of the form
    pub fn value(self, read: fn(&F) -> String) -> impl Fn() -> String + Copy + Send + Sync + 'static {
        move || self.wizard.with(|w| read(w.form()))
    }

    /// Input handler that edits one slice of the form and sends it as an update
    pub fn edit<S: Clone + 'static>(
        self,
        slice: fn(&F) -> &S,
        wrap: fn(S) -> F::Update,
        apply: fn(&mut S, String),
    ) -> impl Fn(web_sys::Event) + Copy + 'static {
        move |ev: web_sys::Event| {
            let mut edited = self.wizard.with_untracked(|w| slice(w.form()).clone());
            apply(&mut edited, event_target_value(&ev));
            self.wizard.update(|w| w.update(wrap(edited)));
            self.touched.set(true);
        }
    }

    /// Inline error for a field of the active step
    pub fn error(self, field: &'static str) -> impl IntoView {
        let visible = Signal::derive(move || self.touched.get());
        super::form_fields::error_text(visible, move || {
            self.wizard
                .with(|w| w.step_errors().message_for(field).map(str::to_string))
        })
    }

    /// Back to an empty form at the first step
    pub fn reset(self) {
        self.wizard.update(|w| w.clear_progress());
        self.touched.set(false);
    }
}

/// Frame a wizard: `body` renders one step, `on_submit` receives the finished form
pub fn wizard_shell<F, B>(
    handle: WizardHandle<F>,
    submitting: ReadSignal<bool>,
    body: B,
    on_submit: Callback<F>,
) -> impl IntoView
where
    F: WizardForm + Send + Sync + 'static,
    B: Fn(F::Step) -> AnyView + Send + Sync + 'static,
{
    let ctx = use_app_context();
    let wizard = handle.wizard;
    // step bodies rebuild only when the step changes, not on every keystroke
    let current = Memo::new(move |_| wizard.with(|w| w.current_index()));

    let on_back = move |_| {
        if wizard.try_update(|w| w.back()).unwrap_or(false) {
            handle.touched.set(false);
        }
    };

    let on_next = move |_| match wizard.try_update(|w| w.next()) {
        Some(Ok(_)) => handle.touched.set(false),
        Some(Err(err)) => {
            handle.touched.set(true);
            web_sys::console::warn_1(&format!("[WIZARD] {}", err).into());
        }
        None => {}
    };

    let on_finish = move |_| match wizard.with_untracked(|w| w.finish()) {
        Ok(form) => on_submit.run(form),
        Err(errors) => {
            handle.touched.set(true);
            ctx.warn(format!("Some steps are incomplete: {}", errors));
        }
    };

    let indicator = F::steps()
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let step_class = move || {
                let active = current.get();
                if index == active {
                    "wizard-step active"
                } else if index < active {
                    "wizard-step done"
                } else {
                    "wizard-step"
                }
            };
            view! {
                <li class=step_class>
                    <button
                        disabled=move || index > current.get()
                        on:click=move |_| {
                            if wizard.try_update(|w| w.go_to(index)).unwrap_or(false) {
                                handle.touched.set(false);
                            }
                        }
                    >
                        {format!("{}. {}", index + 1, F::step_title(*step))}
                    </button>
                </li>
            }
        })
        .collect_view();

    let is_last = move || current.get() + 1 >= F::steps().len();

    view! {
        <div class="wizard">
            <ol class="wizard-steps">{indicator}</ol>
            <div class="wizard-body">
                {move || body(F::steps()[current.get()])}
            </div>
            <div class="wizard-nav">
                <button class="wizard-back" disabled=move || current.get() == 0 on:click=on_back>
                    "Back"
                </button>
                <Show
                    when=is_last
                    fallback=move || view! {
                        <button
                            class="wizard-next"
                            disabled=move || !wizard.with(|w| w.can_go_next())
                            on:click=on_next
                        >
                            "Next"
                        </button>
                    }
                >
                    <button
                        class="wizard-submit"
                        disabled=move || submitting.get()
                        on:click=on_finish
                    >
                        {move || if submitting.get() { "Submitting…" } else { "Submit" }}
                    </button>
                </Show>
                <button class="wizard-clear" on:click=move |_| handle.reset()>
                    "Clear progress"
                </button>
            </div>
        </div>
    }
}
