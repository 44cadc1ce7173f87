//! Language center application model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LanguageCenter;

/// Application submitted from a language center page.
///
/// Always belongs to one center and is removed together with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LanguageCenterApplication {
    pub id: i64,
    pub language_center_id: i64,
    pub full_name: String,
    pub nationality: String,
    pub country_of_residence: String,
    /// Months
    pub study_duration: u32,
    pub email: String,
    pub country_code: String,
    pub phone_number: String,
    /// Stored document paths, relative to the media root
    pub passport_photo: String,
    pub personal_photo: String,
    pub high_school_certificate: String,
    pub accept_terms: bool,
    pub created_at: DateTime<Utc>,
}

impl LanguageCenterApplication {
    /// Human-readable label, e.g. for logs: `"{full_name} - {center}"`
    pub fn label(&self, center: &LanguageCenter) -> String {
        format!("{} - {}", self.full_name, center.name)
    }

    /// Stored document paths, relative to the media root
    pub fn documents(&self) -> [&str; 3] {
        [
            &self.passport_photo,
            &self.personal_photo,
            &self.high_school_certificate,
        ]
    }
}

/// Validated applicant data ready to be stored
#[derive(Debug, Clone)]
pub struct CreateApplicationInput {
    pub language_center_id: i64,
    pub full_name: String,
    pub nationality: String,
    pub country_of_residence: String,
    pub study_duration: u32,
    pub email: String,
    pub country_code: String,
    pub phone_number: String,
    pub passport_photo: String,
    pub personal_photo: String,
    pub high_school_certificate: String,
    pub accept_terms: bool,
}
