use crate::form::{collect, form_fields};
use crate::render::{render_page, Outcome};
use crate::state::AppState;
use axum::{
    extract::{Form, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use loanwise_core::verdict::PREDICTION_ERROR_HINT;
use loanwise_core::{ApplicantRecord, SCHEMA_VERSION};
use std::collections::HashMap;
use tracing::info_span;
use uuid::Uuid;

// ============================================================================
// Page endpoints
// ============================================================================

/// Blank form filled with the defaults
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(
        state.predictor.model_info(),
        &ApplicantRecord::default(),
        None,
    ))
}

/// "Check Eligibility": evaluate the submitted form and re-render the page
pub async fn check(
    State(state): State<AppState>,
    Form(params): Form<HashMap<String, String>>,
) -> Response {
    let request_id = Uuid::new_v4();
    let record = collect(&params);
    let info = state.predictor.model_info();
    let result = info_span!("check", %request_id).in_scope(|| state.predictor.assess(&record));

    match result {
        Ok(assessment) => Html(render_page(
            info,
            &record,
            Some(Outcome::Assessment(&assessment)),
        ))
        .into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_page(info, &record, Some(Outcome::Error(&e)))),
        )
            .into_response(),
    }
}

// ============================================================================
// API endpoints
// ============================================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "model": state.predictor.model_info(),
    }))
}

/// Form controls and model identity, for clients that build their own form
pub async fn schema(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "model": state.predictor.model_info(),
        "fields": form_fields(),
    }))
}

/// JSON record in, JSON assessment out.
///
/// Values are clamped to the field ranges the same way the form does it.
pub async fn predict(
    State(state): State<AppState>,
    Json(record): Json<ApplicantRecord>,
) -> Response {
    let request_id = Uuid::new_v4();
    let record = record.clamped();
    let result = info_span!("predict", %request_id).in_scope(|| state.predictor.assess(&record));

    match result {
        Ok(assessment) => Json(assessment).into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "error": e.to_string(),
                "hint": PREDICTION_ERROR_HINT,
            })),
        )
            .into_response(),
    }
}

/// Prometheus text exposition
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
