//! Partner university model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// University shown in the partner directory.
///
/// Listed by `(sort_order, name)`; hidden from public pages when inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct University {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub location: String,
    pub website: String,
    /// Path relative to the media root, under `partners/universities/`
    pub logo: Option<String>,
    pub sort_order: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for University {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Input for creating a university
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUniversityInput {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub sort_order: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[cfg(test)]
impl CreateUniversityInput {
    /// Active university with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            description: String::new(),
            location: String::new(),
            website: String::new(),
            logo: None,
            sort_order: 0,
            is_active: true,
        }
    }
}

pub(crate) fn default_active() -> bool {
    true
}
