//! Language center application service
//!
//! Resolves the target center, validates the form and its three documents,
//! stores the files and then the record. Files written for a submission
//! whose insert fails are removed again.

use std::sync::Arc;

use super::storage::{MediaCategory, MediaStorage};
use super::ServiceError;
use crate::config::UploadConfig;
use crate::db::repositories::{ApplicationRepository, LanguageCenterRepository};
use crate::forms::{ApplicationForm, ApplicationUploads, UploadedFile};
use crate::models::{CreateApplicationInput, LanguageCenter, LanguageCenterApplication};

pub struct ApplicationService {
    centers: Arc<dyn LanguageCenterRepository>,
    applications: Arc<dyn ApplicationRepository>,
    storage: Arc<MediaStorage>,
    upload: UploadConfig,
}

impl ApplicationService {
    pub fn new(
        centers: Arc<dyn LanguageCenterRepository>,
        applications: Arc<dyn ApplicationRepository>,
        storage: Arc<MediaStorage>,
        upload: UploadConfig,
    ) -> Self {
        Self {
            centers,
            applications,
            storage,
            upload,
        }
    }

    pub async fn submit(
        &self,
        slug: &str,
        form: &ApplicationForm,
        uploads: ApplicationUploads,
    ) -> Result<LanguageCenterApplication, ServiceError> {
        let center = self
            .centers
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("language center {}", slug)))?;

        let validated = form.validate(uploads, &self.upload)?;

        let mut stored = Vec::with_capacity(3);
        let passport_photo = self
            .store(MediaCategory::Passport, &validated.passport_photo, &mut stored)
            .await?;
        let personal_photo = self
            .store(MediaCategory::PersonalPhoto, &validated.personal_photo, &mut stored)
            .await?;
        let high_school_certificate = self
            .store(MediaCategory::Certificate, &validated.high_school_certificate, &mut stored)
            .await?;

        let input = CreateApplicationInput {
            language_center_id: center.id,
            full_name: validated.full_name,
            nationality: validated.nationality,
            country_of_residence: validated.country_of_residence,
            study_duration: validated.study_duration,
            email: validated.email,
            country_code: validated.country_code,
            phone_number: validated.phone_number,
            passport_photo,
            personal_photo,
            high_school_certificate,
            accept_terms: true,
        };

        match self.applications.create(&input).await {
            Ok(application) => {
                tracing::info!(
                    "Application {} received: {}",
                    application.id,
                    application.label(&center)
                );
                Ok(application)
            }
            Err(e) => {
                tracing::error!("Failed to store application for {}: {:#}", center.slug, e);
                self.discard(&stored).await;
                Err(e.into())
            }
        }
    }

    pub async fn list_for_center(
        &self,
        center: &LanguageCenter,
    ) -> Result<Vec<LanguageCenterApplication>, ServiceError> {
        Ok(self.applications.list_by_center(center.id).await?)
    }

    async fn store(
        &self,
        category: MediaCategory,
        file: &UploadedFile,
        stored: &mut Vec<String>,
    ) -> Result<String, ServiceError> {
        match self.storage.save(category, file).await {
            Ok(path) => {
                stored.push(path.clone());
                Ok(path)
            }
            Err(e) => {
                self.discard(stored).await;
                Err(e.into())
            }
        }
    }

    async fn discard(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.storage.remove(path).await {
                tracing::warn!("Failed to remove orphaned upload {}: {:#}", path, e);
            }
        }
    }
}
