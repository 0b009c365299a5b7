//! Field-level validation errors for request bodies.

use serde::Serialize;

/// Message attached to every missing required field.
pub const REQUIRED: &str = "This field is required";

/// One invalid request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, REQUIRED)
    }
}

/// Collects the errors of one request body.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a required text field. Absent and empty values are both missing.
    pub fn text(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            Some(value) if !value.is_empty() => value,
            _ => {
                self.errors.push(FieldError::required(field));
                String::new()
            }
        }
    }

    /// Takes any other required field.
    pub fn present<T: Default>(&mut self, field: &str, value: Option<T>) -> T {
        value.unwrap_or_else(|| {
            self.errors.push(FieldError::required(field));
            T::default()
        })
    }

    /// Returns `value` if no field failed.
    pub fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_missing_field() {
        let mut v = Validator::new();
        let slug = v.text("slug", Some(String::new()));
        let price: i64 = v.present("price100", None);
        let name = v.text("name", Some("Dough".into()));

        let errors = v.finish((slug, name, price)).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::required("slug"), FieldError::required("price100")]
        );
    }

    #[test]
    fn zero_is_a_present_value() {
        let mut v = Validator::new();
        let price = v.present("price100", Some(0i64));
        assert_eq!(v.finish(price), Ok(0));
    }
}
