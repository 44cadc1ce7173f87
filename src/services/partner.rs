//! Partner directory service
//!
//! Public listing of active universities and language centers, plus the
//! administrative operations used by the maintenance binary:
//! - creation with slug generation and uniqueness checks
//! - deletion of a language center together with its applications
//! - bulk import from a YAML file

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use super::storage::MediaStorage;
use super::{generate_slug, ServiceError};
use crate::db::repositories::{LanguageCenterRepository, UniversityRepository};
use crate::forms::{FormErrors, REQUIRED_MESSAGE};
use crate::models::{
    CreateLanguageCenterInput, CreateUniversityInput, LanguageCenter, PartnerDirectory,
    PartnerImport, University,
};

/// Outcome of a partner import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub skipped: usize,
}

pub struct PartnerService {
    universities: Arc<dyn UniversityRepository>,
    language_centers: Arc<dyn LanguageCenterRepository>,
    storage: Arc<MediaStorage>,
}

impl PartnerService {
    pub fn new(
        universities: Arc<dyn UniversityRepository>,
        language_centers: Arc<dyn LanguageCenterRepository>,
        storage: Arc<MediaStorage>,
    ) -> Self {
        Self {
            universities,
            language_centers,
            storage,
        }
    }

    /// Active partners, each list ordered by `(sort_order, name)`
    pub async fn directory(&self) -> Result<PartnerDirectory, ServiceError> {
        Ok(PartnerDirectory {
            universities: self.universities.list_active().await?,
            language_centers: self.language_centers.list_active().await?,
        })
    }

    /// Resolve a language center by slug, active or not
    pub async fn get_language_center(&self, slug: &str) -> Result<LanguageCenter, ServiceError> {
        self.language_centers
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("language center {}", slug)))
    }

    pub async fn create_university(&self, input: CreateUniversityInput) -> Result<University, ServiceError> {
        let slug = resolve_slug(&input.name, input.slug.as_deref())?;
        if self.universities.exists_by_slug(&slug).await? {
            return Err(ServiceError::DuplicateSlug(slug));
        }

        let now = Utc::now();
        let university = University {
            id: 0,
            name: input.name.trim().to_string(),
            slug,
            description: input.description,
            location: input.location,
            website: input.website,
            logo: input.logo,
            sort_order: input.sort_order,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };
        Ok(self.universities.create(&university).await?)
    }

    pub async fn create_language_center(
        &self,
        input: CreateLanguageCenterInput,
    ) -> Result<LanguageCenter, ServiceError> {
        let slug = resolve_slug(&input.name, input.slug.as_deref())?;
        if self.language_centers.exists_by_slug(&slug).await? {
            return Err(ServiceError::DuplicateSlug(slug));
        }

        let now = Utc::now();
        let center = LanguageCenter {
            id: 0,
            name: input.name.trim().to_string(),
            slug,
            description: input.description,
            about: input.about,
            features: input.features,
            programs: input.programs,
            fees: input.fees,
            location_info: input.location_info,
            location: input.location,
            website: input.website,
            logo: input.logo,
            detail_url: input.detail_url,
            sort_order: input.sort_order,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        };
        Ok(self.language_centers.create(&center).await?)
    }

    /// Delete a center and its applications, returning how many
    /// applications went with it. The applications' documents are removed
    /// from media storage after the delete commits.
    pub async fn delete_language_center(&self, slug: &str) -> Result<u64, ServiceError> {
        let center = self.get_language_center(slug).await?;
        let removed = self.language_centers.delete_with_applications(center.id).await?;

        for application in &removed {
            for path in application.documents() {
                if let Err(e) = self.storage.remove(path).await {
                    tracing::warn!("Failed to remove document {}: {:#}", path, e);
                }
            }
        }

        tracing::info!(
            "Deleted language center {} with {} application(s)",
            center.slug,
            removed.len()
        );
        Ok(removed.len() as u64)
    }

    /// Create missing partners from an import document; existing slugs are skipped
    pub async fn import_partners(&self, import: PartnerImport) -> Result<ImportSummary, ServiceError> {
        let mut summary = ImportSummary::default();

        for input in import.universities {
            match self.create_university(input).await {
                Ok(university) => {
                    tracing::info!("Imported university {}", university.slug);
                    summary.created += 1;
                }
                Err(ServiceError::DuplicateSlug(slug)) => {
                    tracing::debug!("Skipping existing university {}", slug);
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        for input in import.language_centers {
            match self.create_language_center(input).await {
                Ok(center) => {
                    tracing::info!("Imported language center {}", center.slug);
                    summary.created += 1;
                }
                Err(ServiceError::DuplicateSlug(slug)) => {
                    tracing::debug!("Skipping existing language center {}", slug);
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    /// Read a YAML import file and import it
    pub async fn import_partners_file(&self, path: &Path) -> Result<ImportSummary, ServiceError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read import file: {:?}", path))?;
        let import: PartnerImport = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse import file: {:?}", path))?;
        self.import_partners(import).await
    }
}

fn resolve_slug(name: &str, slug: Option<&str>) -> Result<String, ServiceError> {
    let mut errors = FormErrors::new();
    if name.trim().is_empty() {
        errors.add("name", REQUIRED_MESSAGE);
    }

    let slug = match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => generate_slug(name),
    };
    if slug.is_empty() {
        errors.add("slug", REQUIRED_MESSAGE);
    }

    errors.into_result(slug).map_err(ServiceError::from)
}
