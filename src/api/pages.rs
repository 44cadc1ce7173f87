//! Static pages and the partner directory

use axum::{extract::State, http::Uri, routing::get, Router};
use tera::Context as TeraContext;

use crate::api::middleware::{AppState, PageResult};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/index.html", get(home))
        .route("/about/", get(about))
        .route("/about.html", get(about))
        .route("/services/", get(services))
        .route("/services.html", get(services))
        .route("/partners/", get(partners))
        .route("/partners.html", get(partners))
}

async fn home(State(state): State<AppState>, uri: Uri) -> PageResult {
    Ok(state.render("index.html", TeraContext::new(), uri.path()))
}

async fn about(State(state): State<AppState>, uri: Uri) -> PageResult {
    Ok(state.render("about.html", TeraContext::new(), uri.path()))
}

async fn services(State(state): State<AppState>, uri: Uri) -> PageResult {
    Ok(state.render("services.html", TeraContext::new(), uri.path()))
}

/// GET /partners/ - active universities and language centers
async fn partners(State(state): State<AppState>, uri: Uri) -> PageResult {
    let directory = state
        .partner_service
        .directory()
        .await
        .map_err(|e| state.page_error(e, uri.path()))?;

    let mut context = TeraContext::new();
    context.insert("universities", &directory.universities);
    context.insert("language_centers", &directory.language_centers);
    Ok(state.render("partners.html", context, uri.path()))
}
