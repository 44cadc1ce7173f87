//! Form validation
//!
//! Submitted forms are plain structs deserialized from the request. Each
//! exposes a `validate` method returning either the cleaned input for the
//! repository layer or a [`FormErrors`] map for re-rendering the page.
//! Validators never touch the database.

mod application;
mod contact;

pub use application::{ApplicationForm, ApplicationUploads, UploadedFile, ValidatedApplication};
pub use contact::ContactForm;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

pub const REQUIRED_MESSAGE: &str = "هذا الحقل مطلوب.";
pub const INVALID_EMAIL_MESSAGE: &str = "أدخل عنوان بريد إلكتروني صالح.";
pub const INVALID_PHONE_MESSAGE: &str = "يرجى إدخال رقم هاتف صحيح";
pub const TERMS_MESSAGE: &str = "يجب الموافقة على الشروط قبل الإرسال";
pub const INVALID_NUMBER_MESSAGE: &str = "أدخل رقماً صحيحاً.";
pub const FILE_TOO_LARGE_MESSAGE: &str = "حجم الملف يتجاوز الحد المسموح.";
pub const FILE_TYPE_MESSAGE: &str = "نوع الملف غير مدعوم.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Field name to validation messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when no errors were recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

pub fn max_length_message(max: usize) -> String {
    format!("تأكد أن هذه القيمة لا تتجاوز {} حرفاً.", max)
}

pub fn is_valid_email(value: &str) -> bool {
    value.len() <= 254 && EMAIL_RE.is_match(value)
}

/// Checkbox values browsers and clients send for a ticked box
pub fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

/// Trim a required text field, recording errors for blank or overlong values.
pub(crate) fn required_text(errors: &mut FormErrors, field: &str, value: &str, max: usize) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED_MESSAGE);
    } else if value.chars().count() > max {
        errors.add(field, max_length_message(max));
    }
    value.to_string()
}

pub(crate) fn required_email(errors: &mut FormErrors, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED_MESSAGE);
    } else if !is_valid_email(value) {
        errors.add(field, INVALID_EMAIL_MESSAGE);
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_accumulate() {
        let mut errors = FormErrors::new();
        assert!(errors.is_empty());

        errors.add("phone", INVALID_PHONE_MESSAGE);
        errors.add("email", REQUIRED_MESSAGE);
        errors.add("email", INVALID_EMAIL_MESSAGE);

        assert!(errors.has("phone"));
        assert!(!errors.has("name"));
        assert_eq!(errors.get("email").unwrap().len(), 2);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email", "phone"]);
        assert!(errors.to_string().starts_with("email: "));
    }

    #[test]
    fn test_form_errors_serialize_as_map() {
        let mut errors = FormErrors::new();
        errors.add("accept_terms", TERMS_MESSAGE);

        let value = tera::Context::from_serialize(&errors).unwrap();
        assert!(value.contains_key("accept_terms"));
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("no at sign.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_checkbox_values() {
        for value in ["on", "true", "1", "yes", "YES", " on "] {
            assert!(is_checked(value), "{value} should be checked");
        }
        for value in ["", "off", "false", "0", "no"] {
            assert!(!is_checked(value), "{value} should not be checked");
        }
    }

    #[test]
    fn test_required_text() {
        let mut errors = FormErrors::new();
        assert_eq!(required_text(&mut errors, "name", "  Sara  ", 10), "Sara");
        assert!(errors.is_empty());

        required_text(&mut errors, "name", "   ", 10);
        required_text(&mut errors, "major", "a very long major", 5);
        assert_eq!(errors.get("name").unwrap(), [REQUIRED_MESSAGE.to_string()]);
        assert_eq!(errors.get("major").unwrap(), [max_length_message(5)]);
    }

    #[test]
    fn test_max_length_counts_characters() {
        let mut errors = FormErrors::new();
        // Ten bytes, five characters.
        required_text(&mut errors, "country", "عمانا", 5);
        assert!(errors.is_empty());
    }
}
