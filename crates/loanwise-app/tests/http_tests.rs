//! Router tests for the web form and the JSON API

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use loanwise_app::{build_app, AppConfig, AppState, Predictor};
use loanwise_core::verdict::{NO_SPECIFIC_REASON, PREDICTION_ERROR_HINT, REASONS_DISCLAIMER};
use loanwise_core::{Error, FeatureLayout, FeatureRow, ModelInfo, Result};
use loanwise_model::{Classifier, LoadedModel, ModelArtifact, ModelConfig};
use loanwise_rules::Explainer;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

/// Eligible exactly when Income > 100
fn income_stump() -> LoadedModel {
    let artifact: ModelArtifact = serde_json::from_value(serde_json::json!({
        "name": "income-stump",
        "version": "1",
        "feature_names": ["Age", "Experience", "Income", "Family", "CCAvg", "Education",
            "Mortgage", "Securities Account", "CD Account", "Online", "CreditCard"],
        "estimator": {
            "type": "decision_tree",
            "nodes": [
                { "feature": 2, "threshold": 100.0, "left": 1, "right": 2 },
                { "class": 0 },
                { "class": 1 }
            ]
        }
    }))
    .unwrap();
    LoadedModel::from_artifact(artifact, "memory").unwrap()
}

struct BrokenModel {
    layout: FeatureLayout,
    info: ModelInfo,
}

impl Classifier for BrokenModel {
    fn predict(&self, _row: &FeatureRow) -> Result<i64> {
        Err(Error::prediction("estimator state is corrupt"))
    }

    fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    fn info(&self) -> &ModelInfo {
        &self.info
    }
}

fn app_with(model: impl Classifier + 'static) -> Router {
    let predictor = Predictor::new(Arc::new(model), Explainer::default());
    build_app(AppState::new(predictor))
}

fn app() -> Router {
    app_with(income_stump())
}

fn broken_app() -> Router {
    app_with(BrokenModel {
        layout: FeatureLayout::canonical(),
        info: ModelInfo {
            name: "broken".to_string(),
            version: "0".to_string(),
        },
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/check")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_index_shows_form() {
    let (status, body) = send(app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Personal Loan Eligibility Predictor"));
    assert!(body.contains("Enter your details to find out your personal loan eligibility."));
    assert!(body.contains("Your Financial and Personal Details"));
    assert!(body.contains("Check Eligibility"));
    assert!(!body.contains("Prediction Result"));
}

#[tokio::test]
async fn test_check_eligible() {
    let (status, body) = send(
        app(),
        post_form("age=35&experience=10&income=120&family=2&cc_avg=2.0&education=2&mortgage=0&securities_account=1&cd_account=1&online=1&credit_card=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Prediction Result:"));
    assert!(body.contains("Congratulations"));
    assert!(!body.contains("Potential Reasons for Rejection"));
    // Submitted values are kept in the form
    assert!(body.contains(r#"value="120""#));
}

#[tokio::test]
async fn test_check_not_eligible_lists_reasons() {
    let (status, body) = send(
        app(),
        post_form("income=40&cc_avg=0.5&education=1&experience=3&securities_account=0&cd_account=0&online=0&credit_card=0"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Not Eligible"));
    assert!(body.contains("Potential Reasons for Rejection:"));
    assert!(body.contains("- Monthly income might be below the typical threshold for loan approval."));
    assert!(body.contains("- Insufficient work experience could be a contributing factor."));
    assert!(body.contains(REASONS_DISCLAIMER));

    let income = body.find("Monthly income").unwrap();
    let experience = body.find("Insufficient work experience").unwrap();
    assert!(income < experience);
}

#[tokio::test]
async fn test_check_not_eligible_without_reasons() {
    let (status, body) = send(
        app(),
        post_form("income=60&cc_avg=3&education=2&experience=12&securities_account=1&cd_account=1&online=1&credit_card=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Not Eligible"));
    assert!(body.contains(NO_SPECIFIC_REASON));
    assert!(!body.contains("banner warning\">-"));
}

#[tokio::test]
async fn test_check_model_failure_is_422() {
    let (status, body) = send(broken_app(), post_form("income=120")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("An error occurred during prediction:"));
    assert!(body.contains("estimator state is corrupt"));
    assert!(body.contains(PREDICTION_ERROR_HINT));
    assert!(!body.contains("Prediction Result"));
}

#[tokio::test]
async fn test_server_survives_failed_request() {
    let app = broken_app();
    let (first, _) = send(app.clone(), post_form("income=120")).await;
    let (second, _) = send(app.clone(), get("/")).await;
    assert_eq!(first, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(second, StatusCode::OK);
}

#[tokio::test]
async fn test_api_predict() {
    let (status, body) = send(
        app(),
        post_json(serde_json::json!({ "income": 40, "CCAvg": 2.5, "online": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["verdict"], "not_eligible");
    assert_eq!(json["model"]["name"], "income-stump");
    assert_eq!(json["schema_version"], 1);
    assert_eq!(
        json["reasons"][0],
        "Monthly income might be below the typical threshold for loan approval."
    );
    assert_eq!(json["note"], REASONS_DISCLAIMER);
}

#[tokio::test]
async fn test_api_predict_clamps() {
    let (status, body) = send(app(), post_json(serde_json::json!({ "income": 9000 }))).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["verdict"], "eligible");
    assert!(json["reasons"].as_array().unwrap().is_empty());
    assert!(json.get("note").is_none());
}

#[tokio::test]
async fn test_api_predict_failure_is_422() {
    let (status, body) = send(broken_app(), post_json(serde_json::json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("estimator state is corrupt"));
    assert_eq!(json["hint"], PREDICTION_ERROR_HINT);
}

#[tokio::test]
async fn test_api_predict_rejects_bad_education() {
    let (status, _) = send(app(), post_json(serde_json::json!({ "education": 7 }))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_api_health_and_schema() {
    let (status, body) = send(app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model"]["version"], "1");

    let (status, body) = send(app(), get("/api/schema")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let fields = json["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 11);
    assert_eq!(fields[0]["field"], "Age");
    assert_eq!(fields[5]["control"]["kind"], "select");
    assert_eq!(fields[10]["name"], "credit_card");
}

#[tokio::test]
async fn test_static_and_unknown_routes() {
    let response = app().oneshot(get("/static/style.css")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

    let (status, _) = send(app(), get("/static/missing.js")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app(), get("/nowhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_without_recorder_is_empty() {
    let (status, body) = send(app(), get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[test]
fn test_missing_model_stops_startup() {
    let config = AppConfig {
        model: ModelConfig::from_path("does/not/exist.json"),
        ..AppConfig::default()
    };
    let err = AppState::from_config(&config).err().unwrap();
    assert!(matches!(err, Error::ModelNotFound { .. }));
    assert!(err.is_startup_fatal());
}

#[test]
fn test_bad_rules_file_stops_startup() {
    let dir = tempfile::TempDir::new().unwrap();
    let rules = dir.path().join("rules.yaml");
    std::fs::write(&rules, "name: broken\nrules: 12\n").unwrap();

    let config = AppConfig {
        model: ModelConfig::from_path(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/bank_loan_model.json"),
        ),
        rules_path: Some(rules),
        ..AppConfig::default()
    };
    assert!(AppState::from_config(&config).is_err());
}

#[test]
fn test_shipped_model_starts() {
    let config = AppConfig {
        model: ModelConfig::from_path(
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/bank_loan_model.json"),
        ),
        ..AppConfig::default()
    };
    let state = AppState::from_config(&config).unwrap();
    assert_eq!(state.predictor.model_info().name, "bank-loan-logreg");
}
