//! Freelancer Registration Wizard
//!
//! Personal → Expertise → Portfolio → Availability → Review.

use leptos::prelude::*;
use leptos::task::spawn_local;
use site_content::freelancer::{
    parse_skills, Availability, Expertise, PersonalInfo, Portfolio, MAX_BIO_CHARS,
    MAX_HOURS_PER_WEEK, PRIMARY_DOMAINS,
};
use site_content::{FreelancerRegistration, FreelancerStep, FreelancerUpdate};

use super::form_fields::{labeled, number_text, review_row, select_options};
use super::wizard_shell::{wizard_shell, WizardHandle};
use crate::commands;
use crate::context::use_app_context;

type Handle = WizardHandle<FreelancerRegistration>;

fn personal(form: &FreelancerRegistration) -> &PersonalInfo {
    &form.personal
}

fn expertise(form: &FreelancerRegistration) -> &Expertise {
    &form.expertise
}

fn portfolio(form: &FreelancerRegistration) -> &Portfolio {
    &form.portfolio
}

fn availability(form: &FreelancerRegistration) -> &Availability {
    &form.availability
}

#[component]
pub fn FreelancerWizard() -> impl IntoView {
    let ctx = use_app_context();
    let handle = Handle::new();
    let (submitting, set_submitting) = signal(false);

    let on_submit = Callback::new(move |form: FreelancerRegistration| {
        set_submitting.set(true);
        spawn_local(async move {
            match commands::submit_freelancer(&form).await {
                Ok(receipt) => {
                    ctx.notify(format!("Registration received (#{})", receipt.id));
                    handle.reset();
                }
                Err(err) => ctx.report("Submitting registration", &err),
            }
            set_submitting.try_set(false);
        });
    });

    view! {
        <section class="intake-form freelancer-wizard">
            <h2>"Join as a freelancer"</h2>
            {wizard_shell(handle, submitting, move |step| step_body(handle, step), on_submit)}
        </section>
    }
}

fn step_body(h: Handle, step: FreelancerStep) -> AnyView {
    match step {
        FreelancerStep::Personal => personal_step(h).into_any(),
        FreelancerStep::Expertise => expertise_step(h).into_any(),
        FreelancerStep::Portfolio => portfolio_step(h).into_any(),
        FreelancerStep::Availability => availability_step(h).into_any(),
        FreelancerStep::Review => review_step(h).into_any(),
    }
}

fn personal_step(h: Handle) -> impl IntoView {
    view! {
        {labeled(
            "Full name",
            true,
            view! {
                <input
                    type="text"
                    prop:value=h.value(|f| f.personal.full_name.clone())
                    on:input=h.edit(personal, FreelancerUpdate::Personal, |p, v| p.full_name = v)
                />
            },
            h.error("fullName"),
        )}
        {labeled(
            "Email",
            true,
            view! {
                <input
                    type="email"
                    prop:value=h.value(|f| f.personal.email.clone())
                    on:input=h.edit(personal, FreelancerUpdate::Personal, |p, v| p.email = v)
                />
            },
            h.error("email"),
        )}
        {labeled(
            "Phone",
            false,
            view! {
                <input
                    type="tel"
                    prop:value=h.value(|f| f.personal.phone.clone())
                    on:input=h.edit(personal, FreelancerUpdate::Personal, |p, v| p.phone = v)
                />
            },
            (),
        )}
        {labeled(
            "Country",
            true,
            view! {
                <input
                    type="text"
                    prop:value=h.value(|f| f.personal.country.clone())
                    on:input=h.edit(personal, FreelancerUpdate::Personal, |p, v| p.country = v)
                />
            },
            h.error("country"),
        )}
    }
}

fn expertise_step(h: Handle) -> impl IntoView {
    let domain = h.value(|f| f.expertise.primary_domain.clone());
    view! {
        {labeled(
            "Primary domain",
            true,
            view! {
                <select on:change=h.edit(expertise, FreelancerUpdate::Expertise, |e, v| e.primary_domain = v)>
                    {select_options(PRIMARY_DOMAINS, domain)}
                </select>
            },
            h.error("primaryDomain"),
        )}
        {labeled(
            "Skills (comma separated)",
            false,
            view! {
                <input
                    type="text"
                    placeholder="Rust, TypeScript, PostgreSQL"
                    prop:value=h.value(|f| f.expertise.skills.join(", "))
                    on:change=h.edit(expertise, FreelancerUpdate::Expertise, |e, v| e.skills = parse_skills(&v))
                />
            },
            (),
        )}
        {labeled(
            "Years of experience",
            false,
            view! {
                <input
                    type="number"
                    min="0"
                    prop:value=h.value(|f| number_text(f.expertise.years_experience))
                    on:change=h.edit(expertise, FreelancerUpdate::Expertise, |e, v| {
                        e.years_experience = v.trim().parse().unwrap_or_default()
                    })
                />
            },
            (),
        )}
    }
}

fn portfolio_step(h: Handle) -> impl IntoView {
    let bio_count = move || {
        h.wizard
            .with(|w| format!("{} / {}", w.form().portfolio.bio.trim().chars().count(), MAX_BIO_CHARS))
    };
    view! {
        {labeled(
            "Portfolio URL",
            false,
            view! {
                <input
                    type="url"
                    prop:value=h.value(|f| f.portfolio.portfolio_url.clone())
                    on:input=h.edit(portfolio, FreelancerUpdate::Portfolio, |p, v| p.portfolio_url = v)
                />
            },
            h.error("portfolioUrl"),
        )}
        {labeled(
            "LinkedIn URL",
            false,
            view! {
                <input
                    type="url"
                    prop:value=h.value(|f| f.portfolio.linkedin_url.clone())
                    on:input=h.edit(portfolio, FreelancerUpdate::Portfolio, |p, v| p.linkedin_url = v)
                />
            },
            h.error("linkedinUrl"),
        )}
        {labeled(
            "Short bio",
            false,
            view! {
                <textarea
                    rows=5
                    prop:value=h.value(|f| f.portfolio.bio.clone())
                    on:input=h.edit(portfolio, FreelancerUpdate::Portfolio, |p, v| p.bio = v)
                />
                <span class="char-count">{bio_count}</span>
            },
            h.error("bio"),
        )}
    }
}

fn availability_step(h: Handle) -> impl IntoView {
    view! {
        {labeled(
            "Hours per week",
            true,
            view! {
                <input
                    type="number"
                    min="1"
                    max={MAX_HOURS_PER_WEEK.to_string()}
                    prop:value=h.value(|f| number_text(f.availability.hours_per_week))
                    on:input=h.edit(availability, FreelancerUpdate::Availability, |a, v| {
                        a.hours_per_week = v.trim().parse().unwrap_or_default()
                    })
                />
            },
            h.error("hoursPerWeek"),
        )}
        {labeled(
            "Hourly rate (USD)",
            false,
            view! {
                <input
                    type="number"
                    min="0"
                    prop:value=h.value(|f| f.availability.hourly_rate_usd.map(|r| r.to_string()).unwrap_or_default())
                    on:change=h.edit(availability, FreelancerUpdate::Availability, |a, v| {
                        a.hourly_rate_usd = v.trim().parse().ok()
                    })
                />
            },
            (),
        )}
        {labeled(
            "Available from",
            true,
            view! {
                <input
                    type="date"
                    prop:value=h.value(|f| f.availability.start_date.clone())
                    on:input=h.edit(availability, FreelancerUpdate::Availability, |a, v| a.start_date = v)
                />
            },
            h.error("startDate"),
        )}
    }
}

fn review_step(h: Handle) -> impl IntoView {
    let form = h.wizard.with_untracked(|w| w.form().clone());
    let rate = form
        .availability
        .hourly_rate_usd
        .map(|rate| format!("${}/h", rate))
        .unwrap_or_default();
    view! {
        <dl class="review">
            {review_row("Full name", form.personal.full_name)}
            {review_row("Email", form.personal.email)}
            {review_row("Phone", form.personal.phone)}
            {review_row("Country", form.personal.country)}
            {review_row("Primary domain", form.expertise.primary_domain)}
            {review_row("Skills", form.expertise.skills.join(", "))}
            {review_row("Years of experience", number_text(form.expertise.years_experience))}
            {review_row("Portfolio", form.portfolio.portfolio_url)}
            {review_row("LinkedIn", form.portfolio.linkedin_url)}
            {review_row("Bio", form.portfolio.bio)}
            {review_row("Hours per week", number_text(form.availability.hours_per_week))}
            {review_row("Hourly rate", rate)}
            {review_row("Available from", form.availability.start_date)}
        </dl>
    }
}
