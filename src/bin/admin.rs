//! Edupath administration tool
//!
//! Seed and maintenance tasks that run against the configured database.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edupath::{
    config::{Config, UploadConfig},
    db::{
        self,
        repositories::{SqlxLanguageCenterRepository, SqlxPostRepository, SqlxUniversityRepository},
        DynDatabasePool,
    },
    services::{maintenance, MediaStorage, PartnerService},
};

#[derive(Parser, Debug)]
#[command(
    name = "edupath-admin",
    about = "Seed and maintain the Edupath database",
    version
)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "config.yml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show applied and pending schema migrations without applying them
    MigrationStatus,
    /// Insert the launch blog posts when no posts exist
    SeedPosts,
    /// Delete the launch blog posts
    UnseedPosts,
    /// Clear the hero image of every post
    ClearHeroImages,
    /// Create universities and language centers from a YAML file
    ImportPartners {
        /// YAML file with `universities` and `language_centers` lists
        file: PathBuf,
    },
    /// Delete a language center together with its applications
    DeleteLanguageCenter {
        slug: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edupath=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load_with_env(&cli.config)?;

    let pool = db::create_pool(&config.database).await?;
    if !matches!(cli.command, Command::MigrationStatus) {
        db::migrations::run_migrations(&pool).await?;
    }

    let result = run(cli.command, &pool, &config.upload).await;
    pool.close().await;
    result
}

async fn run(command: Command, pool: &DynDatabasePool, upload: &UploadConfig) -> Result<()> {
    let posts = SqlxPostRepository::new(pool.clone());

    match command {
        Command::MigrationStatus => {
            let status = db::migrations::status(pool).await?;
            println!(
                "{} of {} migration(s) applied, {} pending",
                status.applied, status.total, status.pending
            );
            if status.is_up_to_date() {
                println!("Schema is up to date");
            }
        }
        Command::SeedPosts => {
            let inserted = maintenance::seed_posts(&posts).await?;
            println!("Inserted {} post(s)", inserted);
        }
        Command::UnseedPosts => {
            let deleted = maintenance::unseed_posts(&posts).await?;
            println!("Deleted {} post(s)", deleted);
        }
        Command::ClearHeroImages => {
            let cleared = maintenance::clear_hero_images(&posts).await?;
            println!("Cleared hero image on {} post(s)", cleared);
        }
        Command::ImportPartners { file } => {
            let summary = partner_service(pool, upload).import_partners_file(&file).await?;
            println!(
                "Created {} partner(s), skipped {} existing",
                summary.created, summary.skipped
            );
        }
        Command::DeleteLanguageCenter { slug } => {
            let removed = partner_service(pool, upload).delete_language_center(&slug).await?;
            println!(
                "Deleted language center '{}' and {} application(s)",
                slug, removed
            );
        }
    }

    Ok(())
}

fn partner_service(pool: &DynDatabasePool, upload: &UploadConfig) -> PartnerService {
    PartnerService::new(
        SqlxUniversityRepository::boxed(pool.clone()),
        SqlxLanguageCenterRepository::boxed(pool.clone()),
        Arc::new(MediaStorage::new(upload)),
    )
}
