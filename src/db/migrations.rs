//! Database migrations module
//!
//! Code-based schema migrations for the Edupath site. Every migration carries
//! SQL for both SQLite and MySQL and is embedded in the binary.
//!
//! # Usage
//!
//! ```ignore
//! use edupath::db::{create_pool, migrations};
//!
//! let pool = create_pool(&config).await?;
//! migrations::run_migrations(&pool).await?;
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row, SqlitePool};

use super::{Backend, DynDatabasePool};
use crate::config::DatabaseDriver;

/// A database migration with SQL for both SQLite and MySQL
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (must be unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements for SQLite
    pub up_sqlite: &'static str,
    /// SQL statements for MySQL
    pub up_mysql: &'static str,
}

/// Migration record stored in the database
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

/// All schema migrations, applied in order.
pub const MIGRATIONS: &[Migration] = &[
    // Migration 1: blog posts
    Migration {
        version: 1,
        name: "create_posts",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(255) NOT NULL,
                slug VARCHAR(255) NOT NULL UNIQUE,
                excerpt TEXT NOT NULL,
                content TEXT NOT NULL,
                category VARCHAR(100) NOT NULL DEFAULT '',
                hero_image VARCHAR(255),
                published_at DATE NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_posts_published_at ON posts(published_at);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS posts (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                title VARCHAR(255) NOT NULL,
                slug VARCHAR(255) NOT NULL UNIQUE,
                excerpt TEXT NOT NULL,
                content LONGTEXT NOT NULL,
                category VARCHAR(100) NOT NULL DEFAULT '',
                hero_image VARCHAR(255) NULL,
                published_at DATE NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
            ) DEFAULT CHARSET=utf8mb4;
            CREATE INDEX idx_posts_published_at ON posts(published_at);
        "#,
    },
    // Migration 2: partner universities
    Migration {
        version: 2,
        name: "create_universities",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS universities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                slug VARCHAR(255) NOT NULL UNIQUE,
                description VARCHAR(300) NOT NULL DEFAULT '',
                location VARCHAR(255) NOT NULL DEFAULT '',
                website VARCHAR(200) NOT NULL DEFAULT '',
                logo VARCHAR(255),
                sort_order INTEGER NOT NULL DEFAULT 0 CHECK (sort_order >= 0),
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_universities_listing ON universities(is_active, sort_order, name);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS universities (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(255) NOT NULL,
                slug VARCHAR(255) NOT NULL UNIQUE,
                description VARCHAR(300) NOT NULL DEFAULT '',
                location VARCHAR(255) NOT NULL DEFAULT '',
                website VARCHAR(200) NOT NULL DEFAULT '',
                logo VARCHAR(255) NULL,
                sort_order INT UNSIGNED NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
            ) DEFAULT CHARSET=utf8mb4;
            CREATE INDEX idx_universities_listing ON universities(is_active, sort_order, name);
        "#,
    },
    // Migration 3: partner language centers
    Migration {
        version: 3,
        name: "create_language_centers",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS language_centers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                slug VARCHAR(255) NOT NULL UNIQUE,
                description VARCHAR(300) NOT NULL DEFAULT '',
                about TEXT NOT NULL DEFAULT '',
                features TEXT NOT NULL DEFAULT '',
                programs TEXT NOT NULL DEFAULT '',
                fees TEXT NOT NULL DEFAULT '',
                location_info TEXT NOT NULL DEFAULT '',
                location VARCHAR(255) NOT NULL DEFAULT '',
                website VARCHAR(200) NOT NULL DEFAULT '',
                logo VARCHAR(255),
                detail_url VARCHAR(200) NOT NULL DEFAULT '',
                sort_order INTEGER NOT NULL DEFAULT 0 CHECK (sort_order >= 0),
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_language_centers_listing ON language_centers(is_active, sort_order, name);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS language_centers (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(255) NOT NULL,
                slug VARCHAR(255) NOT NULL UNIQUE,
                description VARCHAR(300) NOT NULL DEFAULT '',
                about TEXT NOT NULL,
                features TEXT NOT NULL,
                programs TEXT NOT NULL,
                fees TEXT NOT NULL,
                location_info TEXT NOT NULL,
                location VARCHAR(255) NOT NULL DEFAULT '',
                website VARCHAR(200) NOT NULL DEFAULT '',
                logo VARCHAR(255) NULL,
                detail_url VARCHAR(200) NOT NULL DEFAULT '',
                sort_order INT UNSIGNED NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
            ) DEFAULT CHARSET=utf8mb4;
            CREATE INDEX idx_language_centers_listing ON language_centers(is_active, sort_order, name);
        "#,
    },
    // Migration 4: applications submitted against a language center
    Migration {
        version: 4,
        name: "create_language_center_applications",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS language_center_applications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                language_center_id INTEGER NOT NULL,
                full_name VARCHAR(255) NOT NULL,
                nationality VARCHAR(100) NOT NULL,
                country_of_residence VARCHAR(150) NOT NULL,
                study_duration INTEGER NOT NULL CHECK (study_duration >= 0),
                email VARCHAR(254) NOT NULL,
                country_code VARCHAR(10) NOT NULL,
                phone_number VARCHAR(30) NOT NULL,
                passport_photo VARCHAR(255) NOT NULL,
                personal_photo VARCHAR(255) NOT NULL,
                high_school_certificate VARCHAR(255) NOT NULL,
                accept_terms BOOLEAN NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (language_center_id) REFERENCES language_centers(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_applications_center ON language_center_applications(language_center_id);
            CREATE INDEX IF NOT EXISTS idx_applications_created_at ON language_center_applications(created_at);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS language_center_applications (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                language_center_id BIGINT NOT NULL,
                full_name VARCHAR(255) NOT NULL,
                nationality VARCHAR(100) NOT NULL,
                country_of_residence VARCHAR(150) NOT NULL,
                study_duration INT UNSIGNED NOT NULL,
                email VARCHAR(254) NOT NULL,
                country_code VARCHAR(10) NOT NULL,
                phone_number VARCHAR(30) NOT NULL,
                passport_photo VARCHAR(255) NOT NULL,
                personal_photo VARCHAR(255) NOT NULL,
                high_school_certificate VARCHAR(255) NOT NULL,
                accept_terms BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (language_center_id) REFERENCES language_centers(id) ON DELETE CASCADE
            ) DEFAULT CHARSET=utf8mb4;
            CREATE INDEX idx_applications_created_at ON language_center_applications(created_at);
        "#,
    },
    // Migration 5: contact form messages
    Migration {
        version: 5,
        name: "create_contact_messages",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS contact_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(150) NOT NULL,
                email VARCHAR(254) NOT NULL,
                phone VARCHAR(50) NOT NULL,
                country VARCHAR(100) NOT NULL,
                major VARCHAR(150) NOT NULL,
                message TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_contact_messages_created_at ON contact_messages(created_at);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS contact_messages (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(150) NOT NULL,
                email VARCHAR(254) NOT NULL,
                phone VARCHAR(50) NOT NULL,
                country VARCHAR(100) NOT NULL,
                major VARCHAR(150) NOT NULL,
                message TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            ) DEFAULT CHARSET=utf8mb4;
            CREATE INDEX idx_contact_messages_created_at ON contact_messages(created_at);
        "#,
    },
];

/// Run all pending migrations
///
/// # Returns
///
/// Number of migrations applied
pub async fn run_migrations(pool: &DynDatabasePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied = get_applied_migrations(pool).await?;
    let applied_versions: Vec<i32> = applied.iter().map(|m| m.version as i32).collect();

    let mut count = 0;

    for migration in MIGRATIONS {
        if !applied_versions.contains(&migration.version) {
            tracing::info!(
                "Applying migration {}: {}",
                migration.version,
                migration.name
            );
            apply_migration(pool, migration)
                .await
                .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

/// Create the migrations tracking table if it doesn't exist
async fn create_migrations_table(pool: &DynDatabasePool) -> Result<()> {
    let sql = match pool.driver() {
        DatabaseDriver::Sqlite => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
        DatabaseDriver::Mysql => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INT PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
    };

    pool.execute(sql).await?;
    Ok(())
}

async fn get_applied_migrations(pool: &DynDatabasePool) -> Result<Vec<MigrationRecord>> {
    match pool.backend() {
        Backend::Sqlite(pool) => get_applied_migrations_sqlite(pool).await,
        Backend::Mysql(pool) => get_applied_migrations_mysql(pool).await,
    }
}

async fn get_applied_migrations_sqlite(pool: &SqlitePool) -> Result<Vec<MigrationRecord>> {
    let rows = sqlx::query("SELECT version, name, applied_at FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| MigrationRecord {
            version: row.get("version"),
            name: row.get("name"),
            applied_at: row.get("applied_at"),
        })
        .collect())
}

async fn get_applied_migrations_mysql(pool: &MySqlPool) -> Result<Vec<MigrationRecord>> {
    let rows = sqlx::query("SELECT version, name, applied_at FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| MigrationRecord {
            version: row.get::<i32, _>("version") as i64,
            name: row.get("name"),
            applied_at: row.get("applied_at"),
        })
        .collect())
}

async fn apply_migration(pool: &DynDatabasePool, migration: &Migration) -> Result<()> {
    match pool.backend() {
        Backend::Sqlite(pool) => apply_migration_sqlite(pool, migration).await,
        Backend::Mysql(pool) => apply_migration_mysql(pool, migration).await,
    }
}

async fn apply_migration_sqlite(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    for statement in split_sql_statements(migration.up_sqlite) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

async fn apply_migration_mysql(pool: &MySqlPool, migration: &Migration) -> Result<()> {
    for statement in split_sql_statements(migration.up_mysql) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Truncate SQL for error messages
fn truncate_sql(sql: &str) -> String {
    match sql.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    }
}

/// Split SQL into individual statements, skipping comment-only fragments
fn split_sql_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty() && !is_comment_only(stmt))
        .collect()
}

/// Check if a string contains only SQL comments
fn is_comment_only(s: &str) -> bool {
    s.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with("--"))
}

/// Applied and pending migration counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    pub applied: usize,
    pub pending: usize,
    pub total: usize,
}

impl MigrationStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.pending == 0
    }
}

/// Report how many migrations are applied without applying any
pub async fn status(pool: &DynDatabasePool) -> Result<MigrationStatus> {
    create_migrations_table(pool).await?;

    let applied_versions: Vec<i32> = get_applied_migrations(pool)
        .await?
        .iter()
        .map(|m| m.version as i32)
        .collect();
    let pending = MIGRATIONS
        .iter()
        .filter(|m| !applied_versions.contains(&m.version))
        .count();

    Ok(MigrationStatus {
        applied: MIGRATIONS.len() - pending,
        pending,
        total: MIGRATIONS.len(),
    })
}
