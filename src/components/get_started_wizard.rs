//! Get Started Wizard
//!
//! Project quoting flow: Service → Project → Contact → Review.

use leptos::prelude::*;
use leptos::task::spawn_local;
use site_content::get_started::{
    ContactInfo, ProjectScope, ServiceChoice, BUDGET_RANGES, SERVICE_TYPES, TIMELINES,
};
use site_content::{GetStarted, GetStartedStep, GetStartedUpdate};

use super::form_fields::{labeled, review_row, select_options};
use super::wizard_shell::{wizard_shell, WizardHandle};
use crate::commands;
use crate::context::use_app_context;

type Handle = WizardHandle<GetStarted>;

fn service(form: &GetStarted) -> &ServiceChoice {
    &form.service
}

fn project(form: &GetStarted) -> &ProjectScope {
    &form.project
}

fn contact(form: &GetStarted) -> &ContactInfo {
    &form.contact
}

#[component]
pub fn GetStartedWizard() -> impl IntoView {
    let ctx = use_app_context();
    let handle = Handle::new();
    let (submitting, set_submitting) = signal(false);

    let on_submit = Callback::new(move |form: GetStarted| {
        set_submitting.set(true);
        spawn_local(async move {
            match commands::submit_get_started(&form).await {
                Ok(receipt) => {
                    ctx.notify(format!("Project request received (#{})", receipt.id));
                    handle.reset();
                }
                Err(err) => ctx.report("Submitting project request", &err),
            }
            set_submitting.try_set(false);
        });
    });

    view! {
        <section class="intake-form get-started-wizard">
            <h2>"Get started"</h2>
            {wizard_shell(handle, submitting, move |step| step_body(handle, step), on_submit)}
        </section>
    }
}

fn step_body(h: Handle, step: GetStartedStep) -> AnyView {
    match step {
        GetStartedStep::Service => service_step(h).into_any(),
        GetStartedStep::Project => project_step(h).into_any(),
        GetStartedStep::Contact => contact_step(h).into_any(),
        GetStartedStep::Review => review_step(h).into_any(),
    }
}

fn service_step(h: Handle) -> impl IntoView {
    let service_type = h.value(|f| f.service.service_type.clone());
    view! {
        {labeled(
            "Service",
            true,
            view! {
                <select on:change=h.edit(service, GetStartedUpdate::Service, |s, v| s.service_type = v)>
                    {select_options(SERVICE_TYPES, service_type)}
                </select>
            },
            h.error("serviceType"),
        )}
        {labeled(
            "What do you need?",
            true,
            view! {
                <textarea
                    rows=4
                    prop:value=h.value(|f| f.service.summary.clone())
                    on:input=h.edit(service, GetStartedUpdate::Service, |s, v| s.summary = v)
                />
            },
            h.error("summary"),
        )}
    }
}

fn project_step(h: Handle) -> impl IntoView {
    let budget = h.value(|f| f.project.budget_range.clone());
    let timeline = h.value(|f| f.project.timeline.clone());
    view! {
        {labeled(
            "Budget",
            true,
            view! {
                <select on:change=h.edit(project, GetStartedUpdate::Project, |p, v| p.budget_range = v)>
                    {select_options(BUDGET_RANGES, budget)}
                </select>
            },
            h.error("budgetRange"),
        )}
        {labeled(
            "Timeline",
            true,
            view! {
                <select on:change=h.edit(project, GetStartedUpdate::Project, |p, v| p.timeline = v)>
                    {select_options(TIMELINES, timeline)}
                </select>
            },
            h.error("timeline"),
        )}
        {labeled(
            "Project details",
            false,
            view! {
                <textarea
                    rows=5
                    prop:value=h.value(|f| f.project.details.clone())
                    on:input=h.edit(project, GetStartedUpdate::Project, |p, v| p.details = v)
                />
            },
            (),
        )}
    }
}

fn contact_step(h: Handle) -> impl IntoView {
    view! {
        {labeled(
            "Name",
            true,
            view! {
                <input
                    type="text"
                    prop:value=h.value(|f| f.contact.name.clone())
                    on:input=h.edit(contact, GetStartedUpdate::Contact, |c, v| c.name = v)
                />
            },
            h.error("name"),
        )}
        {labeled(
            "Email",
            true,
            view! {
                <input
                    type="email"
                    prop:value=h.value(|f| f.contact.email.clone())
                    on:input=h.edit(contact, GetStartedUpdate::Contact, |c, v| c.email = v)
                />
            },
            h.error("email"),
        )}
        {labeled(
            "Company",
            false,
            view! {
                <input
                    type="text"
                    prop:value=h.value(|f| f.contact.company.clone())
                    on:input=h.edit(contact, GetStartedUpdate::Contact, |c, v| c.company = v)
                />
            },
            (),
        )}
        {labeled(
            "Phone",
            false,
            view! {
                <input
                    type="tel"
                    prop:value=h.value(|f| f.contact.phone.clone())
                    on:input=h.edit(contact, GetStartedUpdate::Contact, |c, v| c.phone = v)
                />
            },
            (),
        )}
    }
}

fn review_step(h: Handle) -> impl IntoView {
    let form = h.wizard.with_untracked(|w| w.form().clone());
    view! {
        <dl class="review">
            {review_row("Service", form.service.service_type)}
            {review_row("Summary", form.service.summary)}
            {review_row("Budget", form.project.budget_range)}
            {review_row("Timeline", form.project.timeline)}
            {review_row("Details", form.project.details)}
            {review_row("Name", form.contact.name)}
            {review_row("Email", form.contact.email)}
            {review_row("Company", form.contact.company)}
            {review_row("Phone", form.contact.phone)}
        </dl>
    }
}
