//! Contact form message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message left through the contact page, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub major: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for ContactMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.name, self.email)
    }
}

/// Validated contact data ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct CreateContactMessageInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub major: String,
    pub message: String,
}
