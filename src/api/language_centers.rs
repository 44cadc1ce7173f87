//! Language center detail page and application submission
//!
//! The application form is posted as multipart/form-data: text fields map
//! onto [`ApplicationForm`] by name, and the three document fields become
//! [`UploadedFile`]s. A file input left empty by the browser arrives as a
//! part with no file name and counts as missing.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::Uri,
    routing::get,
    Router,
};
use tera::Context as TeraContext;

use crate::api::blog::redirect_to_slash;
use crate::api::middleware::{AppState, PageResult};
use crate::forms::{ApplicationForm, ApplicationUploads, FormErrors, UploadedFile};
use crate::models::LanguageCenter;
use crate::services::ServiceError;

/// Flash text shown after an application is stored
pub const APPLICATION_SUCCESS_MESSAGE: &str = "تم إرسال طلبك بنجاح وسنتواصل معك قريباً.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/language-center/{slug}/",
            get(center_detail).post(submit_application),
        )
        .route(
            "/language-center/{slug}",
            get(center_detail_alias).post(submit_application_alias),
        )
}

/// GET /language-center/{slug}/
async fn center_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> PageResult {
    render_center(&state, &slug, uri.path()).await
}

async fn center_detail_alias(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> PageResult {
    match slug.strip_suffix(".html") {
        Some(slug) if !slug.is_empty() => render_center(&state, slug, uri.path()).await,
        _ => Ok(redirect_to_slash(&uri)),
    }
}

/// POST /language-center/{slug}/
async fn submit_application(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
    multipart: Multipart,
) -> PageResult {
    handle_submission(&state, &slug, uri.path(), multipart).await
}

async fn submit_application_alias(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
    multipart: Multipart,
) -> PageResult {
    match slug.strip_suffix(".html") {
        Some(slug) if !slug.is_empty() => {
            handle_submission(&state, slug, uri.path(), multipart).await
        }
        _ => Ok(redirect_to_slash(&uri)),
    }
}

async fn render_center(state: &AppState, slug: &str, path: &str) -> PageResult {
    let center = state
        .partner_service
        .get_language_center(slug)
        .await
        .map_err(|e| state.page_error(e, path))?;

    let context = center_context(&center, &ApplicationForm::default(), &FormErrors::new(), false);
    Ok(state.render("language_center_detail.html", context, path))
}

async fn handle_submission(
    state: &AppState,
    slug: &str,
    path: &str,
    multipart: Multipart,
) -> PageResult {
    let center = state
        .partner_service
        .get_language_center(slug)
        .await
        .map_err(|e| state.page_error(e, path))?;

    let (form, uploads) = read_application(multipart)
        .await
        .map_err(|e| state.bad_request(&format!("Failed to read multipart: {}", e), path))?;

    let context = match state.application_service.submit(slug, &form, uploads).await {
        Ok(_) => center_context(&center, &ApplicationForm::default(), &FormErrors::new(), true),
        Err(ServiceError::Validation(errors)) => center_context(&center, &form, &errors, false),
        Err(e) => return Err(state.page_error(e, path)),
    };

    Ok(state.render("language_center_detail.html", context, path))
}

fn center_context(
    center: &LanguageCenter,
    form: &ApplicationForm,
    errors: &FormErrors,
    success: bool,
) -> TeraContext {
    let mut context = TeraContext::new();
    context.insert("center", center);
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("success", &success);
    if success {
        context.insert("success_message", APPLICATION_SUCCESS_MESSAGE);
    }
    context
}

/// Split a multipart body into the text form and its documents.
///
/// Unknown fields are ignored; a repeated field keeps its last value.
async fn read_application(
    mut multipart: Multipart,
) -> Result<(ApplicationForm, ApplicationUploads), MultipartError> {
    let mut form = ApplicationForm::default();
    let mut uploads = ApplicationUploads::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        let slot = match name.as_str() {
            "passport_photo" => Some(&mut uploads.passport_photo),
            "personal_photo" => Some(&mut uploads.personal_photo),
            "high_school_certificate" => Some(&mut uploads.high_school_certificate),
            _ => None,
        };
        if let Some(slot) = slot {
            let file_name = field.file_name().unwrap_or("").to_string();
            let content_type = field.content_type().unwrap_or("").to_string();
            let data = field.bytes().await?;
            *slot = (!file_name.is_empty()).then(|| UploadedFile {
                file_name,
                content_type,
                data: data.to_vec(),
            });
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "full_name" => form.full_name = value,
            "nationality" => form.nationality = value,
            "country_of_residence" => form.country_of_residence = value,
            "study_duration" => form.study_duration = value,
            "email" => form.email = value,
            "country_code" => form.country_code = value,
            "phone_number" => form.phone_number = value,
            "accept_terms" => form.accept_terms = value,
            _ => {}
        }
    }

    Ok((form, uploads))
}
