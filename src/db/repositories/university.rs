//! University repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::University;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, SqlitePool};
use std::sync::Arc;

const SELECT_UNIVERSITIES: &str = "SELECT id, name, slug, description, location, website, logo, \
    sort_order, is_active, created_at, updated_at FROM universities";

const INSERT_UNIVERSITY: &str = "INSERT INTO universities \
    (name, slug, description, location, website, logo, sort_order, is_active, created_at, updated_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

#[async_trait]
pub trait UniversityRepository: Send + Sync {
    async fn create(&self, university: &University) -> Result<University>;
    async fn get_by_slug(&self, slug: &str) -> Result<Option<University>>;
    async fn exists_by_slug(&self, slug: &str) -> Result<bool>;
    /// Active universities ordered by `(sort_order, name)`
    async fn list_active(&self) -> Result<Vec<University>>;
}

pub struct SqlxUniversityRepository {
    pool: DynDatabasePool,
}

impl SqlxUniversityRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn UniversityRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl UniversityRepository for SqlxUniversityRepository {
    async fn create(&self, university: &University) -> Result<University> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => create_sqlite(pool, university).await,
            Backend::Mysql(pool) => create_mysql(pool, university).await,
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<University>> {
        let sql = format!("{} WHERE slug = ?", SELECT_UNIVERSITIES);
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                sqlx::query_as::<_, University>(&sql).bind(slug).fetch_optional(pool).await
            }
            Backend::Mysql(pool) => {
                sqlx::query_as::<_, University>(&sql).bind(slug).fetch_optional(pool).await
            }
        }
        .context("Failed to get university")
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool> {
        Ok(self.get_by_slug(slug).await?.is_some())
    }

    async fn list_active(&self) -> Result<Vec<University>> {
        let sql = format!(
            "{} WHERE is_active = ? ORDER BY sort_order, name",
            SELECT_UNIVERSITIES
        );
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                sqlx::query_as::<_, University>(&sql).bind(true).fetch_all(pool).await
            }
            Backend::Mysql(pool) => {
                sqlx::query_as::<_, University>(&sql).bind(true).fetch_all(pool).await
            }
        }
        .context("Failed to list universities")
    }
}

// SQLite implementations
async fn create_sqlite(pool: &SqlitePool, university: &University) -> Result<University> {
    let now = Utc::now();
    let result = sqlx::query(INSERT_UNIVERSITY)
        .bind(&university.name)
        .bind(&university.slug)
        .bind(&university.description)
        .bind(&university.location)
        .bind(&university.website)
        .bind(&university.logo)
        .bind(university.sort_order)
        .bind(university.is_active)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create university")?;

    Ok(University {
        id: result.last_insert_rowid(),
        created_at: now,
        updated_at: now,
        ..university.clone()
    })
}

// MySQL implementations
async fn create_mysql(pool: &MySqlPool, university: &University) -> Result<University> {
    let now = Utc::now();
    let result = sqlx::query(INSERT_UNIVERSITY)
        .bind(&university.name)
        .bind(&university.slug)
        .bind(&university.description)
        .bind(&university.location)
        .bind(&university.website)
        .bind(&university.logo)
        .bind(university.sort_order)
        .bind(university.is_active)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create university")?;

    Ok(University {
        id: result.last_insert_id() as i64,
        created_at: now,
        updated_at: now,
        ..university.clone()
    })
}
