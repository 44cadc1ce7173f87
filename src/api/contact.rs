//! Contact page and form submission

use axum::{extract::State, http::Uri, routing::get, Form, Router};
use tera::Context as TeraContext;

use crate::api::middleware::{AppState, PageResult};
use crate::forms::{ContactForm, FormErrors};
use crate::services::ServiceError;

/// Flash text shown after a message is stored
pub const CONTACT_SUCCESS_MESSAGE: &str = "تم استلام رسالتك وسنتواصل معك قريباً.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact/", get(contact_page).post(submit_contact))
        .route("/contact.html", get(contact_page).post(submit_contact))
}

async fn contact_page(State(state): State<AppState>, uri: Uri) -> PageResult {
    Ok(state.render(
        "contact.html",
        contact_context(&ContactForm::default(), &FormErrors::new(), false),
        uri.path(),
    ))
}

/// POST /contact/ - store the message, or re-render with field errors
async fn submit_contact(
    State(state): State<AppState>,
    uri: Uri,
    Form(form): Form<ContactForm>,
) -> PageResult {
    let context = match state.contact_service.submit(&form).await {
        Ok(_) => contact_context(&ContactForm::default(), &FormErrors::new(), true),
        Err(ServiceError::Validation(errors)) => contact_context(&form, &errors, false),
        Err(e) => return Err(state.page_error(e, uri.path())),
    };

    Ok(state.render("contact.html", context, uri.path()))
}

fn contact_context(form: &ContactForm, errors: &FormErrors, success: bool) -> TeraContext {
    let mut context = TeraContext::new();
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("success", &success);
    if success {
        context.insert("success_message", CONTACT_SUCCESS_MESSAGE);
    }
    context
}
