//! HTTP layer - page handlers and routing
//!
//! Every public page of the site is a server-rendered template:
//! - Home, about, services and the partner directory
//! - Blog listing and post detail
//! - Contact form
//! - Language center detail with the application form
//! - Static theme assets under `/static/` and uploads under `/media/`
//!
//! Each page also answers a legacy `.html` path through the same handler.

pub mod blog;
pub mod contact;
pub mod language_centers;
pub mod middleware;
pub mod pages;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::Uri,
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

pub use middleware::{AppState, PageError, PageResult};

/// Build the page routes
pub fn build_page_router() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(blog::router())
        .merge(contact::router())
        .merge(language_centers::router())
}

/// Build the complete router with middleware
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.theme_engine.static_dir();
    let media_dir = state.upload_config.path.clone();
    let body_limit = state.upload_config.request_body_limit();

    Router::new()
        .merge(build_page_router())
        .nest_service("/static", ServeDir::new(static_dir))
        .nest_service("/media", ServeDir::new(media_dir))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(State(state): State<AppState>, uri: Uri) -> PageError {
    state.not_found(uri.path())
}
