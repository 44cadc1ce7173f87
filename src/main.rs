//! Edupath - study abroad agency website

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edupath::{
    api::{self, AppState},
    config::Config,
    db::{self, repositories::SqlxPostRepository},
    services::maintenance,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edupath=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Edupath...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    if config.site.seed_posts {
        let inserted = maintenance::seed_posts(&SqlxPostRepository::new(pool.clone())).await?;
        if inserted > 0 {
            tracing::info!("Seeded {} blog post(s)", inserted);
        }
    }

    // Build application state
    let state = AppState::new(pool, &config).await?;
    tracing::info!("Theme engine initialized: {}", config.theme.active);

    // Build router
    let app = api::build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
