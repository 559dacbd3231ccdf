use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::config::get_config;
use crate::dto::admin_dto::{LoginRequest, LoginResponse, SessionList};
use crate::dto::response_dto::{ResponsesList, ResponsesQuery};
use crate::dto::session_dto::{CreateSessionRequest, SuccessResponse};
use crate::error::{Error, Result};
use crate::middleware::auth::issue_admin_token;
use crate::utils::crypto::verify_password;
use crate::AppState;

#[axum::debug_handler]
pub async fn login(
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload?;
    let config = get_config();
    if !verify_password(&req.password, &config.admin_password_hash)? {
        tracing::warn!("admin login rejected");
        return Err(Error::Unauthorized("Invalid password".to_string()));
    }
    let (token, expires_at) = issue_admin_token(&config.jwt_secret, config.admin_token_ttl_hours)?;
    Ok(Json(LoginResponse { token, expires_at }))
}

#[axum::debug_handler]
pub async fn list_sessions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let config = get_config();
    let sessions = state
        .review_service
        .list_sessions(|token| config.session_url(token))
        .await?;
    Ok(Json(SessionList { sessions }))
}

#[axum::debug_handler]
pub async fn create_session(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload?;
    let config = get_config();
    let created = state
        .session_service
        .create_session(req, |token| config.session_url(token))
        .await?;
    Ok(Json(created))
}

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(state.session_service.get_with_responses(id).await?))
}

#[axum::debug_handler]
pub async fn review_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    Ok(Json(state.review_service.review(id).await?))
}

#[axum::debug_handler]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    state.session_service.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[axum::debug_handler]
pub async fn list_responses(
    State(state): State<AppState>,
    query: std::result::Result<Query<ResponsesQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let session_id = query
        .session_id
        .ok_or_else(|| Error::BadRequest("session_id is required".to_string()))?;
    let responses = state.response_service.list(session_id).await?;
    Ok(Json(ResponsesList { responses }))
}

#[axum::debug_handler]
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.review_service.dashboard().await?))
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::BadRequest("session id must be a UUID".to_string()))
}
