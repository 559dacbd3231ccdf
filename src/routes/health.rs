use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::services::question_catalog::TOTAL_QUESTIONS;

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
        "questions": TOTAL_QUESTIONS,
    });
    (StatusCode::OK, Json(body))
}
