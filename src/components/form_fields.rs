//! Form Field Helpers
//!
//! Labeled controls shared by the wizards and the single-page intake forms.

use leptos::prelude::*;
use site_content::ValidationErrors;

/// Single-page form state: the value, its last validation, and whether to show it
pub struct FormHandle<F: Clone + Default + Send + Sync + 'static> {
    pub form: RwSignal<F>,
    pub errors: RwSignal<ValidationErrors>,
    pub shown: RwSignal<bool>,
}

impl<F: Clone + Default + Send + Sync + 'static> Clone for FormHandle<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Clone + Default + Send + Sync + 'static> Copy for FormHandle<F> {}

impl<F: Clone + Default + Send + Sync + 'static> FormHandle<F> {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(F::default()),
            errors: RwSignal::new(ValidationErrors::new()),
            shown: RwSignal::new(false),
        }
    }

    pub fn value(self, read: fn(&F) -> String) -> impl Fn() -> String + Copy + Send + Sync + 'static {
        move || self.form.with(|f| read(f))
    }

    pub fn edit(self, apply: fn(&mut F, String)) -> impl Fn(web_sys::Event) + Copy + 'static {
        move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            self.form.update(|f| apply(f, value));
        }
    }

    pub fn error(self, field: impl Into<String>) -> impl IntoView {
        let field = field.into();
        let visible = Signal::derive(move || self.shown.get());
        error_text(visible, move || {
            self.errors.with(|e| e.message_for(&field).map(str::to_string))
        })
    }

    /// Record `errors`; true when the form may be submitted
    pub fn check(self, errors: ValidationErrors) -> bool {
        let valid = errors.is_empty();
        self.errors.set(errors);
        self.shown.set(!valid);
        valid
    }

    pub fn reset(self) {
        self.form.set(F::default());
        self.errors.set(ValidationErrors::new());
        self.shown.set(false);
    }
}

/// Label, control and inline error stacked in one field block
pub fn labeled(
    label: &'static str,
    required: bool,
    control: impl IntoView,
    error: impl IntoView,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">
                {label}
                {required.then(|| view! { <span class="required">" *"</span> })}
            </span>
            {control}
            {error}
        </label>
    }
}

/// Options for a `<select>`, with an empty placeholder first
pub fn select_options<V>(options: &'static [&'static str], current: V) -> impl IntoView
where
    V: Fn() -> String + Copy + Send + Sync + 'static,
{
    view! {
        <option value="" selected=move || current().is_empty()>"Select…"</option>
        {options
            .iter()
            .map(|option| {
                let option = *option;
                view! {
                    <option value=option selected=move || current() == option>
                        {option}
                    </option>
                }
            })
            .collect_view()}
    }
}

/// Inline error span, shown only while `visible`
pub fn error_text<M>(visible: Signal<bool>, message: M) -> impl IntoView
where
    M: Fn() -> Option<String> + Send + Sync + 'static,
{
    move || {
        if !visible.get() {
            return None;
        }
        message().map(|message| view! { <span class="field-error">{message}</span> })
    }
}

/// Read-only row on a review step
pub fn review_row(label: &'static str, value: String) -> impl IntoView {
    let shown = if value.trim().is_empty() {
        "—".to_string()
    } else {
        value
    };
    view! {
        <div class="review-row">
            <dt>{label}</dt>
            <dd>{shown}</dd>
        </div>
    }
}

/// Empty string for zero, so numeric inputs start blank
pub fn number_text<N: PartialEq + Default + ToString>(value: N) -> String {
    if value == N::default() {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_text_blank_for_zero() {
        assert_eq!(number_text(0u8), "");
        assert_eq!(number_text(40u8), "40");
        assert_eq!(number_text(120u32), "120");
    }
}
