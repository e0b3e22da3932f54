//! Delete Confirm Button Component
//!
//! Inline two-step delete used by section rows and the submissions inbox.

use leptos::prelude::*;

/// Confirmation prompt for deleting `subject`
fn confirm_text(subject: &str, until_saved: bool) -> String {
    let subject = subject.trim();
    let mut text = if subject.is_empty() {
        "Delete?".to_string()
    } else {
        format!("Delete \"{}\"?", subject)
    };
    if until_saved {
        text.push_str(" (applies on Save)");
    }
    text
}

/// Inline delete confirmation button
///
/// Shows a × button; clicking it swaps in the prompt with ✓/✗. Escape
/// cancels.
///
/// # Arguments
/// * `button_class` - CSS class for the initial button (e.g. "row-delete-btn")
/// * `subject` - What gets deleted, shown in the prompt and tooltip
/// * `until_saved` - The deletion only takes effect on the next section save
/// * `on_confirm` - Runs when the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] subject: Signal<String>,
    #[prop(optional)] until_saved: bool,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);

    move || {
        if !confirming.get() {
            view! {
                <button
                    class=button_class.clone()
                    title=move || format!("Delete {}", subject.get())
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(true);
                    }
                >
                    "×"
                </button>
            }
            .into_any()
        } else {
            view! {
                <span
                    class="delete-confirm"
                    on:keydown=move |ev| {
                        if ev.key() == "Escape" {
                            set_confirming.set(false);
                        }
                    }
                >
                    <span class="delete-confirm-text">
                        {move || confirm_text(&subject.get(), until_saved)}
                    </span>
                    <button
                        class="confirm-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_confirming.set(false);
                            on_confirm.run(());
                        }
                    >
                        "✓"
                    </button>
                    <button
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_confirming.set(false);
                        }
                    >
                        "✗"
                    </button>
                </span>
            }
            .into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_text_names_subject() {
        assert_eq!(confirm_text("Cloud Hosting", false), "Delete \"Cloud Hosting\"?");
        assert_eq!(confirm_text("  ", false), "Delete?");
        assert_eq!(
            confirm_text("New Item", true),
            "Delete \"New Item\"? (applies on Save)"
        );
    }
}
