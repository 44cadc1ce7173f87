//! Contact message repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::{ContactMessage, CreateContactMessageInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, SqlitePool};
use std::sync::Arc;

const INSERT_MESSAGE: &str = "INSERT INTO contact_messages \
    (name, email, phone, country, major, message, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)";

#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    async fn create(&self, input: &CreateContactMessageInput) -> Result<ContactMessage>;
    /// All messages, newest first
    async fn list(&self) -> Result<Vec<ContactMessage>>;
}

pub struct SqlxContactMessageRepository {
    pool: DynDatabasePool,
}

impl SqlxContactMessageRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ContactMessageRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ContactMessageRepository for SqlxContactMessageRepository {
    async fn create(&self, input: &CreateContactMessageInput) -> Result<ContactMessage> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => create_sqlite(pool, input).await,
            Backend::Mysql(pool) => create_mysql(pool, input).await,
        }
    }

    async fn list(&self) -> Result<Vec<ContactMessage>> {
        let sql = "SELECT id, name, email, phone, country, major, message, created_at \
                   FROM contact_messages ORDER BY created_at DESC, id DESC";
        match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query_as::<_, ContactMessage>(sql).fetch_all(pool).await,
            Backend::Mysql(pool) => sqlx::query_as::<_, ContactMessage>(sql).fetch_all(pool).await,
        }
        .context("Failed to list contact messages")
    }
}

fn into_message(input: &CreateContactMessageInput, id: i64, created_at: chrono::DateTime<Utc>) -> ContactMessage {
    ContactMessage {
        id,
        name: input.name.clone(),
        email: input.email.clone(),
        phone: input.phone.clone(),
        country: input.country.clone(),
        major: input.major.clone(),
        message: input.message.clone(),
        created_at,
    }
}

// SQLite implementations
async fn create_sqlite(pool: &SqlitePool, input: &CreateContactMessageInput) -> Result<ContactMessage> {
    let now = Utc::now();
    let result = sqlx::query(INSERT_MESSAGE)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.country)
        .bind(&input.major)
        .bind(&input.message)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create contact message")?;

    Ok(into_message(input, result.last_insert_rowid(), now))
}

// MySQL implementations
async fn create_mysql(pool: &MySqlPool, input: &CreateContactMessageInput) -> Result<ContactMessage> {
    let now = Utc::now();
    let result = sqlx::query(INSERT_MESSAGE)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.country)
        .bind(&input.major)
        .bind(&input.message)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to create contact message")?;

    Ok(into_message(input, result.last_insert_id() as i64, now))
}
