//! Service error type

use crate::forms::FormErrors;

/// Error types for service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Slug lookup found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Submitted data failed validation; nothing was stored
    #[error("Validation failed: {0}")]
    Validation(#[from] FormErrors),

    /// Slug already taken on creation
    #[error("Slug already exists: {0}")]
    DuplicateSlug(String),

    /// Database or IO failure
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
