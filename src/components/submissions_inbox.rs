//! Submissions Inbox
//!
//! Admin listing of stored intake submissions, newest first, with a detail
//! pane for the selected one.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use site_content::{Submission, SubmissionKind};

use super::DeleteConfirmButton;
use crate::commands;
use crate::context::use_app_context;
use crate::models::{format_bytes, SubmissionDetail};
use crate::store::{store_remove_submission, use_app_store, AppStateStoreFields};

/// Flatten the submitted form into label/value rows
fn detail_rows(submission: &Submission) -> Vec<(String, String)> {
    let data = serde_json::to_value(submission)
        .ok()
        .and_then(|mut envelope| envelope.get_mut("data").map(Value::take));
    let mut rows = Vec::new();
    if let Some(data) = data {
        flatten_into(&mut rows, "", &data);
    }
    rows
}

fn flatten_into(rows: &mut Vec<(String, String)>, prefix: &str, value: &Value) {
    match value {
        Value::Object(fields) => {
            for (key, inner) in fields {
                // attachments are listed separately, from their stored copies
                if prefix.is_empty() && key == "attachments" {
                    continue;
                }
                let label = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(rows, &label, inner);
            }
        }
        Value::Array(items) => {
            let joined: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            rows.push((prefix.to_string(), joined.join(", ")));
        }
        Value::String(s) => rows.push((prefix.to_string(), s.clone())),
        Value::Null => rows.push((prefix.to_string(), String::new())),
        other => rows.push((prefix.to_string(), other.to_string())),
    }
}

#[component]
pub fn SubmissionsInbox() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (filter, set_filter) = signal(None::<SubmissionKind>);
    let (refresh, set_refresh) = signal(0u32);
    let (selected, set_selected) = signal(None::<SubmissionDetail>);

    Effect::new(move |_| {
        let kind = filter.get();
        let _ = refresh.get();
        spawn_local(async move {
            match commands::list_submissions(kind).await {
                Ok(listed) => {
                    web_sys::console::log_1(&format!("[INBOX] Loaded {} submissions", listed.len()).into());
                    *store.submissions().write() = listed;
                }
                Err(err) => ctx.report("Loading submissions", &err),
            }
        });
    });

    let open = move |id: i64| {
        spawn_local(async move {
            match commands::get_submission(id).await {
                Ok(detail) => set_selected.set(Some(detail)),
                Err(err) => ctx.report("Opening submission", &err),
            }
        });
    };

    let delete = move |id: i64| {
        spawn_local(async move {
            match commands::delete_submission(id).await {
                Ok(()) => {
                    store_remove_submission(&store, id);
                    if selected.get_untracked().map(|d| d.id) == Some(id) {
                        set_selected.set(None);
                    }
                    ctx.notify(format!("Submission #{} deleted", id));
                }
                Err(err) => ctx.report("Deleting submission", &err),
            }
        });
    };

    view! {
        <div class="submissions-inbox">
            <div class="inbox-toolbar">
                <select on:change=move |ev| {
                    let kind: Option<SubmissionKind> = event_target_value(&ev).parse().ok();
                    set_filter.set(kind);
                }>
                    <option value="">"All kinds"</option>
                    {SubmissionKind::ALL
                        .into_iter()
                        .map(|kind| view! { <option value=kind.as_str()>{kind.label()}</option> })
                        .collect_view()}
                </select>
                <button on:click=move |_| set_refresh.update(|n| *n += 1)>"Refresh"</button>
            </div>
            <div class="inbox-body">
                <ul class="inbox-list">
                    <For
                        each=move || store.submissions().get()
                        key=|summary| summary.id
                        children=move |summary| {
                            let id = summary.id;
                            let row_class = move || {
                                if selected.with(|s| s.as_ref().map(|d| d.id) == Some(id)) {
                                    "inbox-row selected"
                                } else {
                                    "inbox-row"
                                }
                            };
                            view! {
                                <li class=row_class on:click=move |_| open(id)>
                                    <span class="inbox-kind">{summary.kind.label()}</span>
                                    <span class="inbox-name">{summary.name.clone()}</span>
                                    <span class="inbox-email">{summary.email.clone()}</span>
                                    <span class="inbox-date">{summary.created_at.clone()}</span>
                                    {(summary.attachment_count > 0)
                                        .then(|| view! { <span class="inbox-clip">{format!("📎 {}", summary.attachment_count)}</span> })}
                                    <DeleteConfirmButton
                                        button_class="row-delete-btn"
                                        subject=format!("submission #{}", id)
                                        on_confirm=Callback::new(move |_| delete(id))
                                    />
                                </li>
                            }
                        }
                    />
                </ul>
                <Show when=move || store.submissions().with(|s| s.is_empty())>
                    <p class="inbox-empty">"No submissions."</p>
                </Show>
                {move || selected.get().map(|detail| view! { <SubmissionDetailPane detail=detail /> })}
            </div>
        </div>
    }
}

#[component]
fn SubmissionDetailPane(detail: SubmissionDetail) -> impl IntoView {
    let rows = detail_rows(&detail.submission)
        .into_iter()
        .map(|(label, value)| {
            view! {
                <div class="review-row">
                    <dt>{label}</dt>
                    <dd>{value}</dd>
                </div>
            }
        })
        .collect_view();

    let attachments = detail
        .attachments
        .iter()
        .map(|file| {
            view! {
                <li class="attachment" title=file.stored_path.clone()>
                    <span class="attachment-name">{file.file_name.clone()}</span>
                    <span class="attachment-size">{format_bytes(file.size_bytes)}</span>
                    <code class="attachment-hash">{file.content_hash.chars().take(12).collect::<String>()}</code>
                </li>
            }
        })
        .collect_view();

    view! {
        <article class="submission-detail">
            <h3>{format!("{} #{}", detail.submission.kind().label(), detail.id)}</h3>
            <p class="submission-date">{detail.created_at.clone()}</p>
            <dl class="review">{rows}</dl>
            {(!detail.attachments.is_empty()).then(|| view! { <h4>"Attachments"</h4> })}
            <ul class="attachment-list">{attachments}</ul>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_content::freelancer::{Expertise, PersonalInfo};
    use site_content::{ContactForm, FreelancerRegistration};

    #[test]
    fn test_contact_rows_are_flat() {
        let submission = Submission::Contact(ContactForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            subject: String::new(),
            message: "Hello".into(),
        });
        let rows = detail_rows(&submission);
        assert!(rows.contains(&("name".to_string(), "Ana".to_string())));
        assert!(rows.contains(&("message".to_string(), "Hello".to_string())));
    }

    #[test]
    fn test_nested_slices_use_dotted_labels() {
        let submission = Submission::Freelancer(FreelancerRegistration {
            personal: PersonalInfo {
                full_name: "Lee".into(),
                ..Default::default()
            },
            expertise: Expertise {
                primary_domain: "Web Development".into(),
                skills: vec!["Rust".into(), "SQL".into()],
                years_experience: 4,
            },
            ..Default::default()
        });
        let rows = detail_rows(&submission);
        assert!(rows.contains(&("personal.fullName".to_string(), "Lee".to_string())));
        assert!(rows.contains(&("expertise.skills".to_string(), "Rust, SQL".to_string())));
        assert!(rows.contains(&("expertise.yearsExperience".to_string(), "4".to_string())));
    }
}
