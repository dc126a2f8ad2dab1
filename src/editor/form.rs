//! # Form Manager
//!
//! The "create post" form: two controls, `title` and `text`, each carrying a
//! `Required` rule. Values are kept raw. [`PostForm::get_values`] hands them back
//! whether or not they validate, and it is up to the caller to check
//! [`PostForm::is_valid`] before submitting.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Identifies one of the form's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Title,
    Text,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Title => write!(f, "title"),
            FormField::Text => write!(f, "text"),
        }
    }
}

/// A rule a control's value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Present and non-blank after trimming.
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("is required")]
    Required,
}

impl Validator {
    fn check(&self, value: Option<&str>) -> Option<ValidationError> {
        match self {
            Validator::Required => match value {
                Some(v) if !v.trim().is_empty() => None,
                _ => Some(ValidationError::Required),
            },
        }
    }
}

/// A single form input.
#[derive(Debug, Clone, Default)]
pub struct FormControl {
    value: Option<String>,
    validators: Vec<Validator>,
    dirty: bool,
}

impl FormControl {
    pub fn new(validators: Vec<Validator>) -> Self {
        Self {
            value: None,
            validators,
            dirty: false,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
        self.dirty = true;
    }

    /// Back to "never set": no value, not dirty.
    pub fn reset(&mut self) {
        self.value = None;
        self.dirty = false;
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.validators
            .iter()
            .filter_map(|v| v.check(self.value()))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Raw form values; `None` means the control was never set or was reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues {
    pub title: Option<String>,
    pub text: Option<String>,
}

/// The "create post" form.
#[derive(Debug, Clone)]
pub struct PostForm {
    title: FormControl,
    text: FormControl,
}

impl Default for PostForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PostForm {
    pub fn new() -> Self {
        Self {
            title: FormControl::new(vec![Validator::Required]),
            text: FormControl::new(vec![Validator::Required]),
        }
    }

    pub fn control(&self, field: FormField) -> &FormControl {
        match field {
            FormField::Title => &self.title,
            FormField::Text => &self.text,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        match field {
            FormField::Title => self.title.set_value(value),
            FormField::Text => self.text.set_value(value),
        }
    }

    /// Current values, valid or not.
    pub fn get_values(&self) -> FormValues {
        FormValues {
            title: self.title.value.clone(),
            text: self.text.value.clone(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.title.is_valid() && self.text.is_valid()
    }

    /// Every failing rule, tagged with its control.
    pub fn errors(&self) -> Vec<(FormField, ValidationError)> {
        [FormField::Title, FormField::Text]
            .into_iter()
            .flat_map(|field| {
                self.control(field)
                    .errors()
                    .into_iter()
                    .map(move |e| (field, e))
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.title.reset();
        self.text.reset();
    }
}
