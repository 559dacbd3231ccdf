use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::dto::response_dto::SubmitTextRequest;
use crate::dto::session_dto::{CompleteSessionRequest, SuccessResponse};
use crate::error::{Error, Result};
use crate::AppState;

#[axum::debug_handler]
pub async fn get_session_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let found = state.session_service.get_by_token(&token).await?;
    Ok(Json(found))
}

#[axum::debug_handler]
pub async fn submit_text_response(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitTextRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload?;
    state.response_service.submit_text(req).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[axum::debug_handler]
pub async fn complete_session(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CompleteSessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload?;
    let session_id = req
        .session_id
        .ok_or_else(|| Error::BadRequest("session_id is required".to_string()))?;
    state.session_service.complete(session_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
