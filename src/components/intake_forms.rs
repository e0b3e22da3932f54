//! Intake Forms
//!
//! Public intake flows as the admin sees them: the two wizards and the
//! single-page contact, quote and hire-us forms. Every form is validated
//! here before it is sent and again by the backend.

use leptos::prelude::*;
use leptos::task::spawn_local;
use site_content::forms::validate_attachments;
use site_content::get_started::{BUDGET_RANGES, SERVICE_TYPES};
use site_content::{ContactForm, HireUsRequest, QuoteRequest, SubmissionKind};

use super::form_fields::{labeled, select_options, FormHandle};
use super::{FreelancerWizard, GetStartedWizard};
use crate::commands;
use crate::context::use_app_context;
use crate::models::format_bytes;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn IntakeDashboard() -> impl IntoView {
    let (current, set_current) = signal(SubmissionKind::Contact);

    let tabs = SubmissionKind::ALL
        .into_iter()
        .map(|kind| {
            let tab_class = move || {
                if current.get() == kind { "intake-tab active" } else { "intake-tab" }
            };
            view! {
                <button class=tab_class on:click=move |_| set_current.set(kind)>
                    {kind.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="intake-dashboard">
            <nav class="intake-tabs">{tabs}</nav>
            {move || match current.get() {
                SubmissionKind::Contact => view! { <ContactFormView /> }.into_any(),
                SubmissionKind::Quote => view! { <QuoteFormView /> }.into_any(),
                SubmissionKind::HireUs => view! { <HireUsFormView /> }.into_any(),
                SubmissionKind::Freelancer => view! { <FreelancerWizard /> }.into_any(),
                SubmissionKind::GetStarted => view! { <GetStartedWizard /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ContactFormView() -> impl IntoView {
    let ctx = use_app_context();
    let h = FormHandle::<ContactForm>::new();
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = h.form.get_untracked();
        if !h.check(form.validate()) {
            return;
        }
        set_submitting.set(true);
        spawn_local(async move {
            match commands::submit_contact(&form).await {
                Ok(receipt) => {
                    ctx.notify(format!("Message sent (#{})", receipt.id));
                    h.reset();
                }
                Err(err) => ctx.report("Sending message", &err),
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <form class="intake-form" on:submit=on_submit>
            <h2>"Contact us"</h2>
            {labeled(
                "Name",
                true,
                view! { <input type="text" prop:value=h.value(|f| f.name.clone()) on:input=h.edit(|f, v| f.name = v) /> },
                h.error("name"),
            )}
            {labeled(
                "Email",
                true,
                view! { <input type="email" prop:value=h.value(|f| f.email.clone()) on:input=h.edit(|f, v| f.email = v) /> },
                h.error("email"),
            )}
            {labeled(
                "Subject",
                false,
                view! { <input type="text" prop:value=h.value(|f| f.subject.clone()) on:input=h.edit(|f, v| f.subject = v) /> },
                (),
            )}
            {labeled(
                "Message",
                true,
                view! { <textarea rows=6 prop:value=h.value(|f| f.message.clone()) on:input=h.edit(|f, v| f.message = v) /> },
                h.error("message"),
            )}
            <button type="submit" disabled=move || submitting.get()>"Send"</button>
        </form>
    }
}

#[component]
fn QuoteFormView() -> impl IntoView {
    let ctx = use_app_context();
    let h = FormHandle::<QuoteRequest>::new();
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = h.form.get_untracked();
        if !h.check(form.validate()) {
            return;
        }
        set_submitting.set(true);
        spawn_local(async move {
            match commands::submit_quote(&form).await {
                Ok(receipt) => {
                    ctx.notify(format!("Quote request received (#{})", receipt.id));
                    h.reset();
                }
                Err(err) => ctx.report("Requesting quote", &err),
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <form class="intake-form" on:submit=on_submit>
            <h2>"Request a quote"</h2>
            {labeled(
                "Name",
                true,
                view! { <input type="text" prop:value=h.value(|f| f.name.clone()) on:input=h.edit(|f, v| f.name = v) /> },
                h.error("name"),
            )}
            {labeled(
                "Email",
                true,
                view! { <input type="email" prop:value=h.value(|f| f.email.clone()) on:input=h.edit(|f, v| f.email = v) /> },
                h.error("email"),
            )}
            {labeled(
                "Company",
                false,
                view! { <input type="text" prop:value=h.value(|f| f.company.clone()) on:input=h.edit(|f, v| f.company = v) /> },
                (),
            )}
            {labeled(
                "Service",
                true,
                view! {
                    <select on:change=h.edit(|f, v| f.service = v)>
                        {select_options(SERVICE_TYPES, h.value(|f| f.service.clone()))}
                    </select>
                },
                h.error("service"),
            )}
            {labeled(
                "Budget",
                false,
                view! {
                    <select on:change=h.edit(|f, v| f.budget = v)>
                        {select_options(BUDGET_RANGES, h.value(|f| f.budget.clone()))}
                    </select>
                },
                (),
            )}
            {labeled(
                "Details",
                true,
                view! { <textarea rows=6 prop:value=h.value(|f| f.details.clone()) on:input=h.edit(|f, v| f.details = v) /> },
                h.error("details"),
            )}
            <button type="submit" disabled=move || submitting.get()>"Request quote"</button>
        </form>
    }
}

#[component]
fn HireUsFormView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let h = FormHandle::<HireUsRequest>::new();
    let (submitting, set_submitting) = signal(false);
    let (picking, set_picking) = signal(false);

    let on_pick = move |_| {
        set_picking.set(true);
        spawn_local(async move {
            match commands::pick_attachments().await {
                Ok(picked) => {
                    h.form.try_update(|f| {
                        for file in picked {
                            if !f.attachments.iter().any(|a| a.path == file.path) {
                                f.attachments.push(file);
                            }
                        }
                    });
                    let limits = store.config().get_untracked().attachment_limits();
                    let problems =
                        h.form.with_untracked(|f| validate_attachments(&f.attachments, limits));
                    if !problems.is_empty() {
                        ctx.warn(problems.to_string());
                    }
                }
                Err(err) => ctx.report("Picking attachments", &err),
            }
            set_picking.try_set(false);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = h.form.get_untracked();
        let limits = store.config().get_untracked().attachment_limits();
        if !h.check(form.validate_with(limits)) {
            return;
        }
        set_submitting.set(true);
        spawn_local(async move {
            match commands::submit_hire_us(&form).await {
                Ok(receipt) => {
                    ctx.notify(format!(
                        "Request received (#{}, {} attachment(s))",
                        receipt.id, receipt.attachment_count
                    ));
                    h.reset();
                }
                Err(err) => ctx.report("Sending hire request", &err),
            }
            set_submitting.try_set(false);
        });
    };

    let attachments = move || {
        h.form
            .with(|f| f.attachments.clone())
            .into_iter()
            .enumerate()
            .collect::<Vec<_>>()
    };

    let limits_hint = move || {
        let config = store.config().get();
        format!(
            "Up to {} PDF files, {} each",
            config.max_attachments,
            format_bytes(config.max_attachment_bytes)
        )
    };

    view! {
        <form class="intake-form" on:submit=on_submit>
            <h2>"Hire us"</h2>
            {labeled(
                "Name",
                true,
                view! { <input type="text" prop:value=h.value(|f| f.name.clone()) on:input=h.edit(|f, v| f.name = v) /> },
                h.error("name"),
            )}
            {labeled(
                "Email",
                true,
                view! { <input type="email" prop:value=h.value(|f| f.email.clone()) on:input=h.edit(|f, v| f.email = v) /> },
                h.error("email"),
            )}
            {labeled(
                "Company",
                false,
                view! { <input type="text" prop:value=h.value(|f| f.company.clone()) on:input=h.edit(|f, v| f.company = v) /> },
                (),
            )}
            {labeled(
                "Role",
                false,
                view! { <input type="text" prop:value=h.value(|f| f.role.clone()) on:input=h.edit(|f, v| f.role = v) /> },
                (),
            )}
            {labeled(
                "Project details",
                true,
                view! { <textarea rows=6 prop:value=h.value(|f| f.details.clone()) on:input=h.edit(|f, v| f.details = v) /> },
                h.error("details"),
            )}
            <div class="attachments">
                <div class="attachments-header">
                    <span class="field-label">"Attachments"</span>
                    <span class="hint">{limits_hint}</span>
                    <button type="button" disabled=move || picking.get() on:click=on_pick>
                        "Attach PDFs…"
                    </button>
                </div>
                {h.error("attachments")}
                <ul class="attachment-list">
                    <For
                        each=attachments
                        key=|(index, file)| (*index, file.path.clone())
                        children=move |(index, file)| {
                            let path = file.path.clone();
                            view! {
                                <li class="attachment">
                                    <span class="attachment-name">{file.file_name.clone()}</span>
                                    <span class="attachment-size">{format_bytes(file.size_bytes)}</span>
                                    {h.error(format!("attachments[{}]", index))}
                                    <button
                                        type="button"
                                        class="attachment-remove"
                                        on:click=move |_| {
                                            let path = path.clone();
                                            h.form.update(|f| f.attachments.retain(|a| a.path != path));
                                        }
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
            <button type="submit" disabled=move || submitting.get()>"Send request"</button>
        </form>
    }
}

