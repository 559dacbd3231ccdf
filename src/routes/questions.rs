use axum::{response::IntoResponse, Json};
use serde_json::json;

use crate::models::question::PublicQuestion;
use crate::services::question_catalog::{self, TOTAL_POINTS, TOTAL_QUESTIONS};

/// The catalog as the candidate sees it; expected answers stay server side.
#[axum::debug_handler]
pub async fn list_questions() -> impl IntoResponse {
    let questions: Vec<PublicQuestion> = question_catalog::all()
        .iter()
        .map(PublicQuestion::from)
        .collect();
    Json(json!({
        "questions": questions,
        "blocks": question_catalog::blocks(),
        "total_questions": TOTAL_QUESTIONS,
        "total_points": TOTAL_POINTS,
    }))
}
