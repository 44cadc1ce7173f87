//! Blog listing and post detail pages

use axum::{
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use tera::Context as TeraContext;

use crate::api::middleware::{AppState, PageResult};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blog/", get(blog_list))
        .route("/blog.html", get(blog_list))
        .route("/blog/{slug}/", get(blog_detail))
        .route("/blog/{slug}", get(blog_detail_alias))
}

/// GET /blog/ - all posts, newest first
async fn blog_list(State(state): State<AppState>, uri: Uri) -> PageResult {
    let posts = state
        .post_service
        .list()
        .await
        .map_err(|e| state.page_error(e, uri.path()))?;

    let mut context = TeraContext::new();
    context.insert("posts", &posts);
    Ok(state.render("blog_list.html", context, uri.path()))
}

/// GET /blog/{slug}/ - a post and its related posts
async fn blog_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> PageResult {
    render_post(&state, &slug, uri.path()).await
}

/// GET /blog/{slug}.html renders the post; a bare `/blog/{slug}` redirects
/// to the slash form
async fn blog_detail_alias(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> PageResult {
    match slug.strip_suffix(".html") {
        Some(slug) if !slug.is_empty() => render_post(&state, slug, uri.path()).await,
        _ => Ok(redirect_to_slash(&uri)),
    }
}

async fn render_post(state: &AppState, slug: &str, path: &str) -> PageResult {
    let detail = state
        .post_service
        .detail(slug)
        .await
        .map_err(|e| state.page_error(e, path))?;

    let mut context = TeraContext::new();
    context.insert("post", &detail.post);
    context.insert("related_posts", &detail.related_posts);
    Ok(state.render("blog_detail.html", context, path))
}

/// Permanent redirect to the same path with a trailing slash.
///
/// Uses the raw path so percent-encoded slugs stay valid header values.
pub(crate) fn redirect_to_slash(uri: &Uri) -> axum::response::Response {
    Redirect::permanent(&format!("{}/", uri.path())).into_response()
}
