//! Database layer
//!
//! Database abstraction for the Edupath site. It supports:
//! - SQLite (default, for single-binary deployment)
//! - MySQL (for larger deployments)
//!
//! The driver is selected from configuration. Repositories receive a
//! [`DynDatabasePool`] and match on [`Backend`] to run dialect-specific SQL.
//!
//! # Usage
//!
//! ```ignore
//! use edupath::config::DatabaseConfig;
//! use edupath::db::{create_pool, migrations};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::run_migrations(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, Backend, DatabasePool, DynDatabasePool, MysqlDatabase,
    SqliteDatabase,
};
