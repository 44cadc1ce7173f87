//! Contact message service

use std::sync::Arc;

use super::ServiceError;
use crate::db::repositories::ContactMessageRepository;
use crate::forms::ContactForm;
use crate::models::ContactMessage;

pub struct ContactService {
    repo: Arc<dyn ContactMessageRepository>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactMessageRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a contact submission
    pub async fn submit(&self, form: &ContactForm) -> Result<ContactMessage, ServiceError> {
        let input = form.validate()?;
        let message = self.repo.create(&input).await?;
        tracing::info!("Contact message {} received from {}", message.id, message.email);
        Ok(message)
    }

    pub async fn list(&self) -> Result<Vec<ContactMessage>, ServiceError> {
        Ok(self.repo.list().await?)
    }
}
