//! Configuration des routes pour l'application.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::backend::handlers::{index, register};
use crate::intake::IntakeHandler;

/// Initialisation du routeur principal
pub fn get_router(handler: Arc<IntakeHandler>) -> Router {
    let router = Router::new()
        .route("/", get(index).post(register)) // Formulaire et soumission
        .layer(Extension(handler));

    // Requêtes de n'importe quelle origine autorisées (en mode debug uniquement)
    if cfg!(debug_assertions) {
        let cors = CorsLayer::new()
            .allow_methods(tower_http::cors::AllowMethods::any())
            .allow_origin(Any);
        router.layer(cors)
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::intake::tests::{FakeMailer, FakeStore};
    use axum::body::{to_bytes, Body};
    use http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app(store: FakeStore, mailer: FakeMailer) -> (Router, Arc<FakeStore>, Arc<FakeMailer>) {
        let store = Arc::new(store);
        let mailer = Arc::new(mailer);
        let handler = Arc::new(IntakeHandler::new(
            Arc::new(test_config()),
            store.clone(),
            mailer.clone(),
        ));
        (get_router(handler), store, mailer)
    }

    fn submit(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let (app, _, _) = app(FakeStore::accepting(), FakeMailer::answering(202));
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let html = body_text(resp).await;
        assert!(html.contains("Register and Get Your Welcome Email!"));
        assert!(html.contains("name=\"first_name\""));
        assert!(html.contains("placeholder=\"john.doe@example.com\""));
    }

    #[tokio::test]
    async fn test_submit_success() {
        let (app, store, mailer) = app(FakeStore::accepting(), FakeMailer::answering(202));

        let resp = app
            .oneshot(submit("first_name=John&last_name=Doe&email=john.doe%40example.com"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let html = body_text(resp).await;
        assert!(html.contains("Successfully added John Doe to leads!"));
        assert!(html.contains("Confirmation email sent to john.doe@example.com!"));
        assert_eq!(store.calls.lock().unwrap().len(), 1);
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_missing_field_keeps_form() {
        let (app, store, _) = app(FakeStore::accepting(), FakeMailer::answering(202));

        let resp = app
            .oneshot(submit("first_name=John&last_name=&email=john.doe%40example.com"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let html = body_text(resp).await;
        assert!(html.contains("Please fill in all fields."));
        assert!(html.contains("banner warning"));
        assert!(html.contains("value=\"John\""));
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_persist_failure() {
        let (app, _, mailer) = app(FakeStore::refusing(), FakeMailer::answering(202));

        let resp = app
            .oneshot(submit("first_name=John&last_name=Doe&email=john.doe%40example.com"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let html = body_text(resp).await;
        assert!(html.contains("banner error"));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_email_refused_is_warning() {
        let (app, _, _) = app(FakeStore::accepting(), FakeMailer::answering(500));

        let resp = app
            .oneshot(submit("first_name=John&last_name=Doe&email=john.doe%40example.com"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let html = body_text(resp).await;
        assert!(html.contains("Failed to send email. Status Code: 500"));
        assert!(!html.contains("banner error"));
    }
}
