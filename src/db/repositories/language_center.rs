//! Language center repository

use super::application::SELECT_APPLICATIONS;
use crate::db::{Backend, DynDatabasePool};
use crate::models::{LanguageCenter, LanguageCenterApplication};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, SqlitePool};
use std::sync::Arc;

const SELECT_CENTERS: &str = "SELECT id, name, slug, description, about, features, programs, fees, \
    location_info, location, website, logo, detail_url, sort_order, is_active, created_at, updated_at \
    FROM language_centers";

const INSERT_CENTER: &str = "INSERT INTO language_centers \
    (name, slug, description, about, features, programs, fees, location_info, location, website, \
    logo, detail_url, sort_order, is_active, created_at, updated_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

#[async_trait]
pub trait LanguageCenterRepository: Send + Sync {
    async fn create(&self, center: &LanguageCenter) -> Result<LanguageCenter>;
    /// Lookup regardless of `is_active`
    async fn get_by_slug(&self, slug: &str) -> Result<Option<LanguageCenter>>;
    async fn exists_by_slug(&self, slug: &str) -> Result<bool>;
    /// Active centers ordered by `(sort_order, name)`
    async fn list_active(&self) -> Result<Vec<LanguageCenter>>;
    /// Delete a center and its applications in one transaction.
    ///
    /// Returns the applications removed with it, so their stored documents
    /// can be cleaned up once the delete is committed.
    async fn delete_with_applications(&self, id: i64) -> Result<Vec<LanguageCenterApplication>>;
}

pub struct SqlxLanguageCenterRepository {
    pool: DynDatabasePool,
}

impl SqlxLanguageCenterRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn LanguageCenterRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl LanguageCenterRepository for SqlxLanguageCenterRepository {
    async fn create(&self, center: &LanguageCenter) -> Result<LanguageCenter> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => create_sqlite(pool, center).await,
            Backend::Mysql(pool) => create_mysql(pool, center).await,
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<LanguageCenter>> {
        let sql = format!("{} WHERE slug = ?", SELECT_CENTERS);
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                sqlx::query_as::<_, LanguageCenter>(&sql).bind(slug).fetch_optional(pool).await
            }
            Backend::Mysql(pool) => {
                sqlx::query_as::<_, LanguageCenter>(&sql).bind(slug).fetch_optional(pool).await
            }
        }
        .context("Failed to get language center")
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool> {
        Ok(self.get_by_slug(slug).await?.is_some())
    }

    async fn list_active(&self) -> Result<Vec<LanguageCenter>> {
        let sql = format!(
            "{} WHERE is_active = ? ORDER BY sort_order, name",
            SELECT_CENTERS
        );
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                sqlx::query_as::<_, LanguageCenter>(&sql).bind(true).fetch_all(pool).await
            }
            Backend::Mysql(pool) => {
                sqlx::query_as::<_, LanguageCenter>(&sql).bind(true).fetch_all(pool).await
            }
        }
        .context("Failed to list language centers")
    }

    async fn delete_with_applications(&self, id: i64) -> Result<Vec<LanguageCenterApplication>> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => delete_with_applications_sqlite(pool, id).await,
            Backend::Mysql(pool) => delete_with_applications_mysql(pool, id).await,
        }
    }
}

// SQLite implementations
async fn create_sqlite(pool: &SqlitePool, center: &LanguageCenter) -> Result<LanguageCenter> {
    let now = Utc::now();
    let result = sqlx::query(INSERT_CENTER)
        .bind(&center.name)
        .bind(&center.slug)
        .bind(&center.description)
        .bind(&center.about)
        .bind(&center.features)
        .bind(&center.programs)
        .bind(&center.fees)
        .bind(&center.location_info)
        .bind(&center.location)
        .bind(&center.website)
        .bind(&center.logo)
        .bind(&center.detail_url)
        .bind(center.sort_order)
        .bind(center.is_active)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create language center")?;

    Ok(LanguageCenter {
        id: result.last_insert_rowid(),
        created_at: now,
        updated_at: now,
        ..center.clone()
    })
}

async fn delete_with_applications_sqlite(
    pool: &SqlitePool,
    id: i64,
) -> Result<Vec<LanguageCenterApplication>> {
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let removed = sqlx::query_as::<_, LanguageCenterApplication>(&format!(
        "{} WHERE language_center_id = ?",
        SELECT_APPLICATIONS
    ))
    .bind(id)
    .fetch_all(&mut *tx)
    .await
    .context("Failed to load applications")?;

    sqlx::query("DELETE FROM language_center_applications WHERE language_center_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to delete applications")?;

    sqlx::query("DELETE FROM language_centers WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to delete language center")?;

    tx.commit().await.context("Failed to commit transaction")?;
    Ok(removed)
}

// MySQL implementations
async fn create_mysql(pool: &MySqlPool, center: &LanguageCenter) -> Result<LanguageCenter> {
    let now = Utc::now();
    let result = sqlx::query(INSERT_CENTER)
        .bind(&center.name)
        .bind(&center.slug)
        .bind(&center.description)
        .bind(&center.about)
        .bind(&center.features)
        .bind(&center.programs)
        .bind(&center.fees)
        .bind(&center.location_info)
        .bind(&center.location)
        .bind(&center.website)
        .bind(&center.logo)
        .bind(&center.detail_url)
        .bind(center.sort_order)
        .bind(center.is_active)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create language center")?;

    Ok(LanguageCenter {
        id: result.last_insert_id() as i64,
        created_at: now,
        updated_at: now,
        ..center.clone()
    })
}

async fn delete_with_applications_mysql(
    pool: &MySqlPool,
    id: i64,
) -> Result<Vec<LanguageCenterApplication>> {
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let removed = sqlx::query_as::<_, LanguageCenterApplication>(&format!(
        "{} WHERE language_center_id = ?",
        SELECT_APPLICATIONS
    ))
    .bind(id)
    .fetch_all(&mut *tx)
    .await
    .context("Failed to load applications")?;

    sqlx::query("DELETE FROM language_center_applications WHERE language_center_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to delete applications")?;

    sqlx::query("DELETE FROM language_centers WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("Failed to delete language center")?;

    tx.commit().await.context("Failed to commit transaction")?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations::run_migrations};

    async fn setup() -> (DynDatabasePool, SqlxLanguageCenterRepository) {
        let pool = create_test_pool().await.expect("Failed to create pool");
        run_migrations(&pool).await.expect("Failed to run migrations");
        let repo = SqlxLanguageCenterRepository::new(pool.clone());
        (pool, repo)
    }

    fn center(name: &str, slug: &str, sort_order: u32, is_active: bool) -> LanguageCenter {
        let now = Utc::now();
        LanguageCenter {
            id: 0,
            name: name.to_string(),
            slug: slug.to_string(),
            description: "Intensive English".to_string(),
            about: "<p>About</p>".to_string(),
            features: String::new(),
            programs: String::new(),
            fees: String::new(),
            location_info: String::new(),
            location: "Kuala Lumpur".to_string(),
            website: String::new(),
            logo: None,
            detail_url: String::new(),
            sort_order,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_inactive() {
        let (_pool, repo) = setup().await;
        repo.create(&center("ELS", "els", 0, false)).await.unwrap();

        let found = repo.get_by_slug("els").await.unwrap().unwrap();
        assert!(!found.is_active);
        assert_eq!(found.about, "<p>About</p>");
        assert!(repo.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_active_ordering() {
        let (_pool, repo) = setup().await;
        repo.create(&center("Kaplan", "kaplan", 1, true)).await.unwrap();
        repo.create(&center("ELS", "els", 1, true)).await.unwrap();
        repo.create(&center("Lead", "lead", 0, true)).await.unwrap();

        let slugs: Vec<String> = repo
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(slugs, vec!["lead", "els", "kaplan"]);
    }

    #[tokio::test]
    async fn test_delete_with_applications() {
        let (pool, repo) = setup().await;
        let created = repo.create(&center("ELS", "els", 0, true)).await.unwrap();

        let sqlite = pool.as_sqlite().unwrap();
        for name in ["a", "b"] {
            sqlx::query(
                "INSERT INTO language_center_applications (language_center_id, full_name, nationality, \
                 country_of_residence, study_duration, email, country_code, phone_number, passport_photo, \
                 personal_photo, high_school_certificate, accept_terms) \
                 VALUES (?, ?, 'x', 'x', 6, 'a@b.co', '+60', '12345678', 'p', 'q', 'r', 1)",
            )
            .bind(created.id)
            .bind(name)
            .execute(sqlite)
            .await
            .unwrap();
        }

        let removed = repo.delete_with_applications(created.id).await.unwrap();
        let mut names: Vec<String> = removed.into_iter().map(|a| a.full_name).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
        assert!(repo.get_by_slug("els").await.unwrap().is_none());
        assert!(repo.delete_with_applications(created.id).await.unwrap().is_empty());
    }
}
