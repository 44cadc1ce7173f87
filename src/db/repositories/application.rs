//! Language center application repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::{CreateApplicationInput, LanguageCenterApplication};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, SqlitePool};
use std::sync::Arc;

pub(crate) const SELECT_APPLICATIONS: &str = "SELECT id, language_center_id, full_name, nationality, \
    country_of_residence, study_duration, email, country_code, phone_number, passport_photo, \
    personal_photo, high_school_certificate, accept_terms, created_at \
    FROM language_center_applications";

const INSERT_APPLICATION: &str = "INSERT INTO language_center_applications \
    (language_center_id, full_name, nationality, country_of_residence, study_duration, email, \
    country_code, phone_number, passport_photo, personal_photo, high_school_certificate, \
    accept_terms, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn create(&self, input: &CreateApplicationInput) -> Result<LanguageCenterApplication>;
    /// Applications for one center, newest first
    async fn list_by_center(&self, language_center_id: i64) -> Result<Vec<LanguageCenterApplication>>;
}

pub struct SqlxApplicationRepository {
    pool: DynDatabasePool,
}

impl SqlxApplicationRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ApplicationRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ApplicationRepository for SqlxApplicationRepository {
    async fn create(&self, input: &CreateApplicationInput) -> Result<LanguageCenterApplication> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => create_sqlite(pool, input).await,
            Backend::Mysql(pool) => create_mysql(pool, input).await,
        }
    }

    async fn list_by_center(&self, language_center_id: i64) -> Result<Vec<LanguageCenterApplication>> {
        let sql = format!(
            "{} WHERE language_center_id = ? ORDER BY created_at DESC, id DESC",
            SELECT_APPLICATIONS
        );
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                sqlx::query_as::<_, LanguageCenterApplication>(&sql)
                    .bind(language_center_id)
                    .fetch_all(pool)
                    .await
            }
            Backend::Mysql(pool) => {
                sqlx::query_as::<_, LanguageCenterApplication>(&sql)
                    .bind(language_center_id)
                    .fetch_all(pool)
                    .await
            }
        }
        .context("Failed to list applications")
    }
}

fn into_application(input: &CreateApplicationInput, id: i64, created_at: chrono::DateTime<Utc>) -> LanguageCenterApplication {
    LanguageCenterApplication {
        id,
        language_center_id: input.language_center_id,
        full_name: input.full_name.clone(),
        nationality: input.nationality.clone(),
        country_of_residence: input.country_of_residence.clone(),
        study_duration: input.study_duration,
        email: input.email.clone(),
        country_code: input.country_code.clone(),
        phone_number: input.phone_number.clone(),
        passport_photo: input.passport_photo.clone(),
        personal_photo: input.personal_photo.clone(),
        high_school_certificate: input.high_school_certificate.clone(),
        accept_terms: input.accept_terms,
        created_at,
    }
}

// SQLite implementations
async fn create_sqlite(pool: &SqlitePool, input: &CreateApplicationInput) -> Result<LanguageCenterApplication> {
    let now = Utc::now();
    let result = sqlx::query(INSERT_APPLICATION)
        .bind(input.language_center_id)
        .bind(&input.full_name)
        .bind(&input.nationality)
        .bind(&input.country_of_residence)
        .bind(input.study_duration)
        .bind(&input.email)
        .bind(&input.country_code)
        .bind(&input.phone_number)
        .bind(&input.passport_photo)
        .bind(&input.personal_photo)
        .bind(&input.high_school_certificate)
        .bind(input.accept_terms)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create application")?;

    Ok(into_application(input, result.last_insert_rowid(), now))
}

// MySQL implementations
async fn create_mysql(pool: &MySqlPool, input: &CreateApplicationInput) -> Result<LanguageCenterApplication> {
    let now = Utc::now();
    let result = sqlx::query(INSERT_APPLICATION)
        .bind(input.language_center_id)
        .bind(&input.full_name)
        .bind(&input.nationality)
        .bind(&input.country_of_residence)
        .bind(input.study_duration)
        .bind(&input.email)
        .bind(&input.country_code)
        .bind(&input.phone_number)
        .bind(&input.passport_photo)
        .bind(&input.personal_photo)
        .bind(&input.high_school_certificate)
        .bind(input.accept_terms)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create application")?;

    Ok(into_application(input, result.last_insert_id() as i64, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{LanguageCenterRepository, SqlxLanguageCenterRepository};
    use crate::db::{create_test_pool, migrations::run_migrations};
    use crate::models::LanguageCenter;

    async fn setup() -> (SqlxApplicationRepository, i64) {
        let pool = create_test_pool().await.expect("Failed to create pool");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let now = Utc::now();
        let centers = SqlxLanguageCenterRepository::new(pool.clone());
        let center = centers
            .create(&LanguageCenter {
                id: 0,
                name: "ELS".to_string(),
                slug: "els".to_string(),
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
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        (SqlxApplicationRepository::new(pool), center.id)
    }

    fn input(center_id: i64, name: &str) -> CreateApplicationInput {
        CreateApplicationInput {
            language_center_id: center_id,
            full_name: name.to_string(),
            nationality: "Yemeni".to_string(),
            country_of_residence: "Malaysia".to_string(),
            study_duration: 6,
            email: "ali@example.com".to_string(),
            country_code: "+60".to_string(),
            phone_number: "123456789".to_string(),
            passport_photo: "applications/passport/a.jpg".to_string(),
            personal_photo: "applications/personal/b.png".to_string(),
            high_school_certificate: "applications/certificates/c.pdf".to_string(),
            accept_terms: true,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (repo, center_id) = setup().await;
        let first = repo.create(&input(center_id, "First")).await.unwrap();
        let second = repo.create(&input(center_id, "Second")).await.unwrap();
        assert!(second.id > first.id);

        let listed = repo.list_by_center(center_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].full_name, "Second");
        assert_eq!(listed[1].study_duration, 6);
        assert!(listed[1].accept_terms);
    }

    #[tokio::test]
    async fn test_unknown_center_rejected() {
        let (repo, center_id) = setup().await;
        assert!(repo.create(&input(center_id + 100, "Orphan")).await.is_err());
    }
}
