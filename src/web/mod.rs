//! Form-based web surface

pub mod handlers;
pub mod render;

use crate::metrics::PredictionMetrics;
use crate::models::PredictionDispatcher;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<PredictionDispatcher>,
    pub metrics: Arc<PredictionMetrics>,
}

impl AppState {
    pub fn new(dispatcher: Arc<PredictionDispatcher>, metrics: Arc<PredictionMetrics>) -> Self {
        Self {
            dispatcher,
            metrics,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(
            "/{domain}",
            get(handlers::show_form).post(handlers::submit_form),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classifier::stubs::{FixedClassifier, UnfittedClassifier};
    use crate::models::{Classifier, ModelRegistry};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app(
        diabetes: Box<dyn Classifier>,
        heart_disease: Box<dyn Classifier>,
        parkinsons: Box<dyn Classifier>,
    ) -> Router {
        let registry = Arc::new(ModelRegistry::new(diabetes, heart_disease, parkinsons));
        let metrics = Arc::new(PredictionMetrics::new());
        let dispatcher = Arc::new(PredictionDispatcher::new(registry, metrics.clone()));
        router(AppState::new(dispatcher, metrics))
    }

    fn fixed(label: i64) -> Box<dyn Classifier> {
        Box::new(FixedClassifier::new(label))
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_shows_diabetes_form() {
        let response = app(fixed(0), fixed(0), fixed(0))
            .oneshot(get("/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Diabetes Prediction using ML"));
        assert!(html.contains("Multiple Disease Prediction System"));
        assert!(html.contains("<a href=\"/diabetes\" class=\"active\">"));
    }

    #[tokio::test]
    async fn test_heart_disease_positive_end_to_end() {
        let heart = Arc::new(FixedClassifier::new(1));
        let body = "age=63&sex=1&cp=3&trestbps=145&chol=233&fbs=1&restecg=0\
                    &thalach=150&exang=0&oldpeak=2.3&slope=0&ca=0&thal=1";

        let response = app(fixed(0), Box::new(heart.clone()), fixed(0))
            .oneshot(post_form("/heart-disease", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("The person has heart disease"));
        assert!(html.contains("value=\"233\""));
        assert_eq!(
            heart.calls(),
            vec![vec![63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0]]
        );
    }

    #[tokio::test]
    async fn test_blank_parkinsons_form_invokes_model() {
        let parkinsons = Arc::new(FixedClassifier::new(0));

        let response = app(fixed(0), fixed(0), Box::new(parkinsons.clone()))
            .oneshot(post_form("/parkinsons", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("The person does not have Parkinson&#39;s disease"));
        assert_eq!(parkinsons.calls(), vec![vec![0.0; 22]]);
    }

    #[tokio::test]
    async fn test_invalid_input_keeps_form() {
        let diabetes = Arc::new(FixedClassifier::new(1));

        let response = app(Box::new(diabetes.clone()), fixed(0), fixed(0))
            .oneshot(post_form("/diabetes", "pregnancies=2&glucose=abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("Invalid input detected. Please enter numeric values only."));
        assert!(html.contains("Glucose Level"));
        assert!(html.contains("value=\"abc\""));
        assert!(!html.contains("diabetic"));
        assert!(diabetes.calls().is_empty());
    }

    #[tokio::test]
    async fn test_inference_failure_is_per_request() {
        let response = app(fixed(0), fixed(0), Box::new(UnfittedClassifier))
            .oneshot(post_form("/parkinsons", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_text(response).await;
        assert!(html.contains("model inference failed"));
    }

    #[tokio::test]
    async fn test_unknown_domain_is_not_found() {
        let response = app(fixed(0), fixed(0), fixed(0))
            .oneshot(post_form("/cancer", "a=1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_reports_models() {
        let response = app(fixed(0), fixed(0), fixed(0))
            .oneshot(get("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["models"].as_array().unwrap().len(), 3);
        assert_eq!(json["models"][2]["domain"], "parkinsons");
        assert_eq!(json["models"][2]["features"], 22);
    }
}
