//! Media storage for uploaded files
//!
//! Files are written under the configured upload root, one directory per
//! category, with a generated UUID file name. Records store the path
//! relative to the root, which is also the path served under `/media/`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::forms::UploadedFile;

/// Directory an uploaded file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    PostHero,
    UniversityLogo,
    LanguageCenterLogo,
    Passport,
    PersonalPhoto,
    Certificate,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 6] = [
        MediaCategory::PostHero,
        MediaCategory::UniversityLogo,
        MediaCategory::LanguageCenterLogo,
        MediaCategory::Passport,
        MediaCategory::PersonalPhoto,
        MediaCategory::Certificate,
    ];

    pub fn dir(&self) -> &'static str {
        match self {
            MediaCategory::PostHero => "posts",
            MediaCategory::UniversityLogo => "partners/universities",
            MediaCategory::LanguageCenterLogo => "partners/language-centers",
            MediaCategory::Passport => "applications/passport",
            MediaCategory::PersonalPhoto => "applications/personal",
            MediaCategory::Certificate => "applications/certificates",
        }
    }
}

pub struct MediaStorage {
    root: PathBuf,
    config: UploadConfig,
}

impl MediaStorage {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: config.path.clone(),
            config: config.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create every category directory under the root
    pub async fn ensure_dirs(&self) -> Result<()> {
        for category in MediaCategory::ALL {
            let dir = self.root.join(category.dir());
            fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("Failed to create upload directory: {:?}", dir))?;
        }
        Ok(())
    }

    /// Write a file and return its path relative to the root
    pub async fn save(&self, category: MediaCategory, file: &UploadedFile) -> Result<String> {
        let ext = self.extension_for(file);
        let relative = format!("{}/{}.{}", category.dir(), Uuid::new_v4(), ext);
        let full_path = self.root.join(&relative);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create upload directory: {:?}", parent))?;
        }
        fs::write(&full_path, &file.data)
            .await
            .with_context(|| format!("Failed to write upload: {:?}", full_path))?;

        tracing::debug!("Stored upload {} ({} bytes)", relative, file.data.len());
        Ok(relative)
    }

    /// Remove a previously stored file; a missing file is not an error
    pub async fn remove(&self, relative: &str) -> Result<()> {
        let full_path = self.root.join(relative);
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove upload: {:?}", full_path)),
        }
    }

    /// Extension for the stored copy, taken from the validated content type.
    /// The client's file name never decides what `/media/` serves it as.
    fn extension_for(&self, file: &UploadedFile) -> &'static str {
        self.config.get_extension(&file.effective_content_type())
    }
}
