// src/application/forms.rs
//! Per-field validation for the public submission forms.
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

pub const REQUIRED: &str = "this field is required";

/// Field name to error message, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    /// Records a missing or blank value and passes present ones through.
    pub fn required(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => {
                self.add(field, REQUIRED);
                None
            }
        }
    }

    /// Unwraps a value-object constructor, recording its message on failure.
    pub fn field<T>(&mut self, field: &str, outcome: DomainResult<T>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(DomainError::Validation(msg)) => {
                self.add(field, msg);
                None
            }
            Err(other) => {
                self.add(field, other.to_string());
                None
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn finish(self) -> ApplicationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::InvalidForm(self))
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::EmailAddress;

    #[test]
    fn collects_first_message_per_field() {
        let mut errors = FormErrors::new();
        assert!(errors.required("name", Some("  ".into())).is_none());
        errors.add("name", "second message is ignored");
        assert!(errors.field("email", EmailAddress::new("nope")).is_none());

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some(REQUIRED));
        assert_eq!(errors.get("email"), Some("enter a valid email address"));
        assert!(matches!(
            errors.finish(),
            Err(ApplicationError::InvalidForm(fields)) if fields.len() == 2
        ));
    }

    #[test]
    fn empty_errors_finish_ok() {
        let mut errors = FormErrors::new();
        let email = errors.field("email", EmailAddress::new("ana@example.com"));
        assert!(email.is_some());
        assert!(errors.finish().is_ok());
    }

    #[test]
    fn display_lists_fields_in_order() {
        let mut errors = FormErrors::new();
        errors.add("to", "bad");
        errors.add("email", "worse");
        assert_eq!(errors.to_string(), "email: worse; to: bad");
    }
}
