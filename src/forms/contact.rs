//! Contact form

use serde::{Deserialize, Serialize};

use super::{required_email, required_text, FormErrors, INVALID_PHONE_MESSAGE};
use crate::models::CreateContactMessageInput;

/// Minimum phone length after trimming
pub const MIN_PHONE_LEN: usize = 6;

/// Contact page submission, as posted by the browser.
///
/// Missing fields deserialize to empty strings so they surface as
/// validation errors rather than a rejected request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub major: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<CreateContactMessageInput, FormErrors> {
        let mut errors = FormErrors::new();

        let name = required_text(&mut errors, "name", &self.name, 150);
        let email = required_email(&mut errors, "email", &self.email);
        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.add("phone", super::REQUIRED_MESSAGE);
        } else if phone.chars().count() < MIN_PHONE_LEN {
            errors.add("phone", INVALID_PHONE_MESSAGE);
        } else if phone.chars().count() > 50 {
            errors.add("phone", super::max_length_message(50));
        }
        let country = required_text(&mut errors, "country", &self.country, 100);
        let major = required_text(&mut errors, "major", &self.major, 150);
        let message = self.message.trim();
        if message.is_empty() {
            errors.add("message", super::REQUIRED_MESSAGE);
        }

        errors.into_result(CreateContactMessageInput {
            name,
            email,
            phone: phone.to_string(),
            country,
            major,
            message: message.to_string(),
        })
    }
}
