//! Decoding and validation of submitted HTML forms.
//!
//! Each form keeps the raw submitted strings so an invalid submission can be
//! rendered back to the user, and only yields a typed draft once every field
//! passes validation.

use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors};

pub mod project;
pub mod task;

pub use project::ProjectForm;
pub use task::TaskForm;

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the messages of a failed `Validate` run. Errors declared
    /// without a message get one from `describe`.
    pub fn from_validation(
        errors: &ValidationErrors,
        describe: impl Fn(&str, &ValidationError) -> String,
    ) -> Self {
        let mut collected = Self::new();
        for (field, field_errors) in errors.field_errors() {
            let field: &str = field.as_ref();
            for error in field_errors.iter() {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => describe(field, error),
                };
                collected.add(field, message);
            }
        }
        collected
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Text inputs are trimmed before any constraint runs.
pub(crate) fn normalize(value: &str) -> &str {
    value.trim()
}

/// Trimmed value, or `None` when nothing but whitespace was submitted.
pub(crate) fn present(value: &str) -> Option<String> {
    let value = normalize(value);
    (!value.is_empty()).then(|| value.to_string())
}
