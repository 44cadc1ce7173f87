//! Post repository

use crate::db::{Backend, DynDatabasePool};
use crate::models::Post;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, SqlitePool};
use std::sync::Arc;

const SELECT_POSTS: &str = "SELECT id, title, slug, excerpt, content, category, hero_image, \
    published_at, created_at, updated_at FROM posts";

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &Post) -> Result<Post>;
    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>>;
    async fn exists_by_slug(&self, slug: &str) -> Result<bool>;
    /// All posts, newest publish date first
    async fn list(&self) -> Result<Vec<Post>>;
    /// Up to `limit` posts other than `exclude_id`, in listing order
    async fn list_excluding(&self, exclude_id: i64, limit: i64) -> Result<Vec<Post>>;
    async fn count(&self) -> Result<i64>;
    async fn delete_by_slugs(&self, slugs: &[&str]) -> Result<u64>;
    /// Reset every post's hero image, returning the number of rows changed
    async fn clear_hero_images(&self) -> Result<u64>;
}

pub struct SqlxPostRepository {
    pool: DynDatabasePool,
}

impl SqlxPostRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn PostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, post: &Post) -> Result<Post> {
        match self.pool.backend() {
            Backend::Sqlite(pool) => create_sqlite(pool, post).await,
            Backend::Mysql(pool) => create_mysql(pool, post).await,
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let sql = format!("{} WHERE slug = ?", SELECT_POSTS);
        match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query_as::<_, Post>(&sql).bind(slug).fetch_optional(pool).await,
            Backend::Mysql(pool) => sqlx::query_as::<_, Post>(&sql).bind(slug).fetch_optional(pool).await,
        }
        .context("Failed to get post")
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool> {
        let sql = "SELECT COUNT(*) FROM posts WHERE slug = ?";
        let count: i64 = match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query_scalar(sql).bind(slug).fetch_one(pool).await,
            Backend::Mysql(pool) => sqlx::query_scalar(sql).bind(slug).fetch_one(pool).await,
        }
        .context("Failed to check post slug")?;
        Ok(count > 0)
    }

    async fn list(&self) -> Result<Vec<Post>> {
        let sql = format!("{} ORDER BY published_at DESC, id DESC", SELECT_POSTS);
        match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query_as::<_, Post>(&sql).fetch_all(pool).await,
            Backend::Mysql(pool) => sqlx::query_as::<_, Post>(&sql).fetch_all(pool).await,
        }
        .context("Failed to list posts")
    }

    async fn list_excluding(&self, exclude_id: i64, limit: i64) -> Result<Vec<Post>> {
        let sql = format!(
            "{} WHERE id <> ? ORDER BY published_at DESC, id DESC LIMIT ?",
            SELECT_POSTS
        );
        match self.pool.backend() {
            Backend::Sqlite(pool) => {
                sqlx::query_as::<_, Post>(&sql)
                    .bind(exclude_id)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
            Backend::Mysql(pool) => {
                sqlx::query_as::<_, Post>(&sql)
                    .bind(exclude_id)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
        }
        .context("Failed to list related posts")
    }

    async fn count(&self) -> Result<i64> {
        let sql = "SELECT COUNT(*) FROM posts";
        match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query_scalar(sql).fetch_one(pool).await,
            Backend::Mysql(pool) => sqlx::query_scalar(sql).fetch_one(pool).await,
        }
        .context("Failed to count posts")
    }

    async fn delete_by_slugs(&self, slugs: &[&str]) -> Result<u64> {
        let mut deleted = 0;
        for slug in slugs {
            let sql = "DELETE FROM posts WHERE slug = ?";
            let result = match self.pool.backend() {
                Backend::Sqlite(pool) => sqlx::query(sql).bind(slug).execute(pool).await.map(|r| r.rows_affected()),
                Backend::Mysql(pool) => sqlx::query(sql).bind(slug).execute(pool).await.map(|r| r.rows_affected()),
            };
            deleted += result.with_context(|| format!("Failed to delete post {}", slug))?;
        }
        Ok(deleted)
    }

    async fn clear_hero_images(&self) -> Result<u64> {
        let sql = "UPDATE posts SET hero_image = NULL WHERE hero_image IS NOT NULL";
        match self.pool.backend() {
            Backend::Sqlite(pool) => sqlx::query(sql).execute(pool).await.map(|r| r.rows_affected()),
            Backend::Mysql(pool) => sqlx::query(sql).execute(pool).await.map(|r| r.rows_affected()),
        }
        .context("Failed to clear hero images")
    }
}

// SQLite implementations
async fn create_sqlite(pool: &SqlitePool, post: &Post) -> Result<Post> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO posts (title, slug, excerpt, content, category, hero_image, published_at, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&post.title)
    .bind(&post.slug)
    .bind(&post.excerpt)
    .bind(&post.content)
    .bind(&post.category)
    .bind(&post.hero_image)
    .bind(post.published_at)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create post")?;

    Ok(Post {
        id: result.last_insert_rowid(),
        created_at: now,
        updated_at: now,
        ..post.clone()
    })
}

// MySQL implementations
async fn create_mysql(pool: &MySqlPool, post: &Post) -> Result<Post> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO posts (title, slug, excerpt, content, category, hero_image, published_at, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&post.title)
    .bind(&post.slug)
    .bind(&post.excerpt)
    .bind(&post.content)
    .bind(&post.category)
    .bind(&post.hero_image)
    .bind(post.published_at)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create post")?;

    Ok(Post {
        id: result.last_insert_id() as i64,
        created_at: now,
        updated_at: now,
        ..post.clone()
    })
}
