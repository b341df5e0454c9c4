//! API route handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use engine::{compose_reply, predict, Category, ChatReply, EngineError, HistoricalStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
pub type AppState = Arc<HistoricalStore>;

/// Build the application router around an injected store.
///
/// Cross-origin requests are permitted from any origin; the API carries no
/// credentials.
pub fn router(store: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/api/models/status", get(model_status))
        .route("/api/offers/upload", post(upload_offers))
        .route("/api/offers/predict", post(predict_offers))
        .route("/api/email/upload", post(upload_email))
        .route("/api/email/predict", post(predict_disabled))
        .route("/api/campaigns/upload", post(upload_campaigns))
        .route("/api/campaigns/predict", post(predict_disabled))
        .route("/api/chat/predict", post(chat_predict))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(store)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Error taxonomy to HTTP status mapping. No engine error is fatal; the
/// process keeps serving after a 400.
fn status_for(error: &EngineError) -> StatusCode {
    match error {
        EngineError::InvalidInput | EngineError::InsufficientData => StatusCode::BAD_REQUEST,
    }
}

async fn home() -> Json<Value> {
    Json(serde_json::json!({
        "message": "Prediction Engine API is live",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "working"
    }))
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    data_counts: engine::DataCounts,
}

async fn model_status(State(store): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        data_counts: store.counts(),
    })
}

fn empty_batch() -> Value {
    Value::Array(Vec::new())
}

#[derive(Debug, Deserialize)]
struct UploadRequest {
    /// An absent `data` field is an empty batch, not an error.
    #[serde(default = "empty_batch")]
    data: Value,
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    message: String,
    total: usize,
}

/// Append a batch to a category. The payload must be a list; anything else is
/// rejected before the store is touched, so a failed upload never changes
/// counts.
fn upload(store: &HistoricalStore, category: Category, label: &str, req: UploadRequest) -> Response {
    let Value::Array(records) = req.data else {
        let error = EngineError::InvalidInput;
        return error_response(status_for(&error), &error.to_string());
    };

    let total = store.append(category, records);
    tracing::debug!(category = category.name(), total, "batch uploaded");

    Json(UploadResponse {
        message: format!("{} data uploaded", label),
        total,
    })
    .into_response()
}

async fn upload_offers(
    State(store): State<AppState>,
    Json(req): Json<UploadRequest>,
) -> Response {
    upload(&store, Category::Offers, "Offer", req)
}

async fn upload_email(State(store): State<AppState>, Json(req): Json<UploadRequest>) -> Response {
    upload(&store, Category::EmailCreatives, "Email", req)
}

async fn upload_campaigns(
    State(store): State<AppState>,
    Json(req): Json<UploadRequest>,
) -> Response {
    upload(&store, Category::Campaigns, "Campaign", req)
}

/// Offer forecast over the current offers snapshot. The request body is
/// ignored.
async fn predict_offers(State(store): State<AppState>) -> Response {
    match predict(&store.offers_snapshot()) {
        Ok(prediction) => Json(prediction).into_response(),
        Err(error) => error_response(status_for(&error), &error.to_string()),
    }
}

/// Email and campaign forecasts are not wired to a model.
async fn predict_disabled() -> Response {
    error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        "Prediction engine disabled (ML not connected yet)",
    )
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    /// The browser clients disagreed on the field name; accept both.
    #[serde(default, alias = "message")]
    prompt: String,
}

async fn chat_predict(
    State(store): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatReply> {
    Json(compose_reply(&req.prompt, &store.offers_snapshot()))
}
