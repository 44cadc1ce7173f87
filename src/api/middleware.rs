//! Shared request state and page responses
//!
//! Contains:
//! - `AppState`, the services and theme every handler reads from
//! - `PageError`, an HTML error response rendered through the theme
//! - helpers that render a template with the standard site variables

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tera::Context as TeraContext;

use crate::config::{Config, SiteConfig, UploadConfig};
use crate::db::repositories::{
    SqlxApplicationRepository, SqlxContactMessageRepository, SqlxLanguageCenterRepository,
    SqlxPostRepository, SqlxUniversityRepository,
};
use crate::db::DynDatabasePool;
use crate::services::{
    ApplicationService, ContactService, MediaStorage, PartnerService, PostService, ServiceError,
};
use crate::theme::{StandardTemplateVars, ThemeEngine};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: DynDatabasePool,
    pub post_service: Arc<PostService>,
    pub partner_service: Arc<PartnerService>,
    pub contact_service: Arc<ContactService>,
    pub application_service: Arc<ApplicationService>,
    pub theme_engine: Arc<ThemeEngine>,
    pub upload_config: Arc<UploadConfig>,
    pub site: Arc<SiteConfig>,
}

impl AppState {
    /// Wire repositories, services and the theme engine for `config`
    pub async fn new(pool: DynDatabasePool, config: &Config) -> anyhow::Result<Self> {
        let post_repo = SqlxPostRepository::boxed(pool.clone());
        let university_repo = SqlxUniversityRepository::boxed(pool.clone());
        let center_repo = SqlxLanguageCenterRepository::boxed(pool.clone());
        let application_repo = SqlxApplicationRepository::boxed(pool.clone());
        let contact_repo = SqlxContactMessageRepository::boxed(pool.clone());

        let storage = MediaStorage::new(&config.upload);
        storage.ensure_dirs().await?;
        let storage = Arc::new(storage);

        let theme_engine = ThemeEngine::new(&config.theme.path, &config.theme.active)?;

        Ok(Self {
            post_service: Arc::new(PostService::new(post_repo)),
            partner_service: Arc::new(PartnerService::new(
                university_repo,
                center_repo.clone(),
                storage.clone(),
            )),
            contact_service: Arc::new(ContactService::new(contact_repo)),
            application_service: Arc::new(ApplicationService::new(
                center_repo,
                application_repo,
                storage,
                config.upload.clone(),
            )),
            theme_engine: Arc::new(theme_engine),
            upload_config: Arc::new(config.upload.clone()),
            site: Arc::new(config.site.clone()),
            pool,
        })
    }

    fn standard_vars(&self, request_path: &str) -> StandardTemplateVars {
        StandardTemplateVars::new(&self.site.name, &self.site.description, request_path)
    }

    /// Render a page with status 200
    pub fn render(&self, template: &str, context: TeraContext, request_path: &str) -> Response {
        self.render_status(StatusCode::OK, template, context, request_path)
    }

    /// Render a page with the standard variables, falling back to the
    /// theme's error page if the template fails
    pub fn render_status(
        &self,
        status: StatusCode,
        template: &str,
        context: TeraContext,
        request_path: &str,
    ) -> Response {
        let vars = self.standard_vars(request_path);
        let html = self.theme_engine.render_page(template, &context, &vars);
        (status, Html(html)).into_response()
    }

    /// The theme's 404 page
    pub fn not_found(&self, request_path: &str) -> PageError {
        PageError(self.render_status(
            StatusCode::NOT_FOUND,
            "404.html",
            TeraContext::new(),
            request_path,
        ))
    }

    /// The theme's 400 page for a request that could not be read
    pub fn bad_request(&self, message: &str, request_path: &str) -> PageError {
        tracing::debug!("Bad request on {}: {}", request_path, message);
        let mut context = TeraContext::new();
        context.insert("error_message", message);
        PageError(self.render_status(
            StatusCode::BAD_REQUEST,
            "error.html",
            context,
            request_path,
        ))
    }

    /// Map a service failure to a page; not-found renders 404, anything
    /// else is logged and rendered as a 500
    pub fn page_error(&self, err: ServiceError, request_path: &str) -> PageError {
        match err {
            ServiceError::NotFound(what) => {
                tracing::debug!("Not found on {}: {}", request_path, what);
                self.not_found(request_path)
            }
            other => {
                tracing::error!("Request to {} failed: {:#}", request_path, other);
                let mut context = TeraContext::new();
                context.insert("error_message", "حدث خطأ غير متوقع، يرجى المحاولة لاحقاً.");
                PageError(self.render_status(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "error.html",
                    context,
                    request_path,
                ))
            }
        }
    }
}

/// An error already rendered as an HTML page
#[derive(Debug)]
pub struct PageError(pub Response);

impl PageError {
    pub fn status(&self) -> StatusCode {
        self.0.status()
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0
    }
}

/// Result type for page handlers
pub type PageResult = Result<Response, PageError>;
