//! Partner language center model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::university::{default_active, University};

/// Language center with its own detail page and application form.
///
/// The `about`, `features`, `programs`, `fees` and `location_info` sections
/// hold trusted HTML entered by staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LanguageCenter {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub about: String,
    pub features: String,
    pub programs: String,
    pub fees: String,
    pub location_info: String,
    pub location: String,
    pub website: String,
    /// Path relative to the media root, under `partners/language-centers/`
    pub logo: Option<String>,
    /// Optional external page about the center
    pub detail_url: String,
    pub sort_order: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for LanguageCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Input for creating a language center
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLanguageCenterInput {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub features: String,
    #[serde(default)]
    pub programs: String,
    #[serde(default)]
    pub fees: String,
    #[serde(default)]
    pub location_info: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub detail_url: String,
    #[serde(default)]
    pub sort_order: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[cfg(test)]
impl CreateLanguageCenterInput {
    /// Active center with only a name; remaining sections empty
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            description: String::new(),
            about: String::new(),
            features: String::new(),
            programs: String::new(),
            fees: String::new(),
            location_info: String::new(),
            location: String::new(),
            website: String::new(),
            logo: None,
            detail_url: String::new(),
            sort_order: 0,
            is_active: true,
        }
    }
}

/// Active partners, each list in `(sort_order, name)` order
#[derive(Debug, Clone, Default, Serialize)]
pub struct PartnerDirectory {
    pub universities: Vec<University>,
    pub language_centers: Vec<LanguageCenter>,
}

/// Partner entries loaded from a YAML import file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartnerImport {
    #[serde(default)]
    pub universities: Vec<super::CreateUniversityInput>,
    #[serde(default)]
    pub language_centers: Vec<CreateLanguageCenterInput>,
}
