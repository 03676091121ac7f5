//! HTTP handlers for the prediction forms

use crate::error::DispatchError;
use crate::metrics::MetricsSnapshot;
use crate::types::Domain;
use crate::web::render::{self, Status};
use crate::web::AppState;
use axum::extract::{Form, Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::collections::HashMap;

/// Landing page: the default domain's form
pub async fn index() -> Html<String> {
    let domain = Domain::default();
    Html(render::page::<&str>(domain, &[], None))
}

/// Empty form for a domain
pub async fn show_form(Path(slug): Path<String>, uri: Uri) -> Response {
    match Domain::from_slug(&slug) {
        Some(domain) => Html(render::page::<&str>(domain, &[], None)).into_response(),
        None => not_found(uri).await.into_response(),
    }
}

/// Handle a form submission: coerce, predict, and re-render with the outcome.
///
/// Fields absent from the submission count as blank.
pub async fn submit_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    uri: Uri,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(domain) = Domain::from_slug(&slug) else {
        return not_found(uri).await.into_response();
    };

    let raw: Vec<String> = domain
        .fields()
        .iter()
        .map(|field| form.get(field.key).cloned().unwrap_or_default())
        .collect();

    let (code, status) = match state.dispatcher.submit(domain, &raw) {
        Ok(verdict) => (StatusCode::OK, Status::Success(verdict.message)),
        Err(DispatchError::InvalidInput(e)) => {
            let label = domain.fields().get(e.index()).map_or("", |f| f.label);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Status::Error(format!(
                    "{} \"{}\" is not a number.",
                    DispatchError::InvalidInput(e),
                    label
                )),
            )
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Status::Error(e.to_string())),
    };

    (code, Html(render::page(domain, &raw, Some(&status)))).into_response()
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub domain: Domain,
    pub name: String,
    pub features: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub models: Vec<ModelInfo>,
    pub metrics: MetricsSnapshot,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let models = state
        .dispatcher
        .registry()
        .model_names()
        .into_iter()
        .map(|(domain, name)| ModelInfo {
            domain,
            name,
            features: domain.feature_count(),
        })
        .collect();

    Json(HealthResponse {
        status: "ok",
        models,
        metrics: state.metrics.snapshot(),
    })
}

pub async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render::not_found(uri.path())))
}
