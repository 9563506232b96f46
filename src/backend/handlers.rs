//! Gestion des routes de la page d'inscription.
//! Affiche le formulaire et traite les soumissions.

use std::sync::Arc;

use axum::{extract::Form, response::Html, Extension};
use http::StatusCode;

use crate::backend::models::{PageContext, RegistrationForm};
use crate::intake::{IntakeHandler, Outcome};
use crate::utils::error_messages::{IntakeError, RENDER_ERROR};
use crate::HBS;

/// Affiche la page d'inscription vide
pub async fn index(Extension(handler): Extension<Arc<IntakeHandler>>) -> Html<String> {
    render(&PageContext {
        port: handler.config().http_port,
        ..Default::default()
    })
}

/// Traite une soumission et réaffiche la page avec les bannières de statut
pub async fn register(
    Extension(handler): Extension<Arc<IntakeHandler>>,
    Form(form): Form<RegistrationForm>,
) -> (StatusCode, Html<String>) {
    let outcome = handler.submit(&form).await;

    let status = match &outcome {
        Outcome::Rejected(IntakeError::Validation(_)) => StatusCode::BAD_REQUEST,
        Outcome::Rejected(_) => StatusCode::BAD_GATEWAY,
        Outcome::Accepted { .. } => StatusCode::OK,
    };

    let page = render(&PageContext {
        form,
        banners: outcome.banners(),
        inserted: outcome.inserted_json(),
        port: handler.config().http_port,
    });

    (status, page)
}

fn render(context: &PageContext) -> Html<String> {
    HBS.render("index", context)
        .map(Html)
        .unwrap_or_else(|e| {
            log::error!("Failed to render page: {}", e);
            Html(format!("<h1>{}</h1>", RENDER_ERROR))
        })
}
