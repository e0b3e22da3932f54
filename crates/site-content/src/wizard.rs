//! Multi-step Wizard
//!
//! A linear sequence of steps, each owning a slice of one form value. Steps
//! push typed update messages synchronously; forward navigation is gated on
//! the active step validating, backward navigation never is.

use std::fmt::Debug;

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Form data driven by a wizard
pub trait WizardForm: Default + Clone + Debug {
    type Step: Copy + Eq + Debug + 'static;
    /// Message a step sends when one of its fields is committed
    type Update;

    fn steps() -> &'static [Self::Step];

    fn step_title(step: Self::Step) -> &'static str;

    /// Errors for the fields owned by `step`; empty means the step is complete
    fn validate_step(&self, step: Self::Step) -> ValidationErrors;

    fn apply(&mut self, update: Self::Update);
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("current step is incomplete: {0}")]
    StepIncomplete(ValidationErrors),
    #[error("already at the last step")]
    AtLastStep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wizard<F: WizardForm> {
    form: F,
    current: usize,
}

impl<F: WizardForm> Default for Wizard<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: WizardForm> Wizard<F> {
    pub fn new() -> Self {
        Self {
            form: F::default(),
            current: 0,
        }
    }

    /// Resume with previously entered data at step 0
    pub fn with_form(form: F) -> Self {
        Self { form, current: 0 }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> F::Step {
        F::steps()[self.current]
    }

    pub fn step_count(&self) -> usize {
        F::steps().len()
    }

    pub fn is_first_step(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= F::steps().len()
    }

    /// Apply one step's committed change to the shared form
    pub fn update(&mut self, update: F::Update) {
        self.form.apply(update);
    }

    pub fn step_errors(&self) -> ValidationErrors {
        self.form.validate_step(self.current_step())
    }

    /// Validity of the active step
    pub fn is_valid(&self) -> bool {
        self.step_errors().is_empty()
    }

    /// Whether the "Next" control is enabled
    pub fn can_go_next(&self) -> bool {
        !self.is_last_step() && self.is_valid()
    }

    pub fn next(&mut self) -> Result<F::Step, WizardError> {
        if self.is_last_step() {
            return Err(WizardError::AtLastStep);
        }
        let errors = self.step_errors();
        if !errors.is_empty() {
            return Err(WizardError::StepIncomplete(errors));
        }
        self.current += 1;
        Ok(self.current_step())
    }

    /// Step back; returns false when already at the first step
    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to an earlier step (step indicator click)
    pub fn go_to(&mut self, index: usize) -> bool {
        if index <= self.current {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Reset all entered data and return to the first step
    pub fn clear_progress(&mut self) {
        self.form = F::default();
        self.current = 0;
    }

    /// Validate every step and hand back the form for submission
    pub fn finish(&self) -> Result<F, ValidationErrors> {
        validate_all_steps(&self.form)
            .into_result()
            .map(|_| self.form.clone())
    }
}

/// Errors across every step of `form`
pub fn validate_all_steps<F: WizardForm>(form: &F) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for step in F::steps() {
        errors.extend(form.validate_step(*step));
    }
    errors
}
