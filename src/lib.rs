pub mod capture;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::database::store::SessionStore;
use crate::services::{
    response_service::ResponseService, review_service::ReviewService,
    session_service::SessionService,
};
use crate::storage::BlobStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub session_service: SessionService,
    pub response_service: ResponseService,
    pub review_service: ReviewService,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, blobs: Arc<dyn BlobStore>) -> Self {
        let session_service = SessionService::new(store.clone(), blobs.clone());
        let response_service = ResponseService::new(store.clone(), blobs.clone());
        let review_service = ReviewService::new(store.clone());

        Self {
            store,
            blobs,
            session_service,
            response_service,
            review_service,
        }
    }
}

/// Every API route. Static file serving and CORS are added by the binary.
pub fn build_router(state: AppState) -> Router {
    let config = config::get_config();

    let public_api = Router::new()
        .route(
            "/api/public/sessions/:token",
            get(routes::candidate::get_session_by_token),
        )
        .route("/api/questions", get(routes::questions::list_questions))
        .route(
            "/api/responses",
            post(routes::candidate::submit_text_response),
        )
        .route("/api/upload", post(routes::upload::upload_video))
        .route("/api/complete", post(routes::candidate::complete_session))
        .route("/api/admin/login", post(routes::admin::login))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route(
            "/api/admin/sessions",
            get(routes::admin::list_sessions).post(routes::admin::create_session),
        )
        .route(
            "/api/admin/sessions/:id",
            get(routes::admin::get_session).delete(routes::admin::delete_session),
        )
        .route(
            "/api/admin/sessions/:id/review",
            get(routes::admin::review_session),
        )
        .route("/api/admin/responses", get(routes::admin::list_responses))
        .route("/api/admin/dashboard", get(routes::admin::dashboard))
        .layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.admin_rps),
            middleware::rate_limit::rps_middleware,
        ));

    Router::new()
        .route("/health", get(routes::health::health))
        .merge(public_api)
        .merge(admin_api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_mb * 1024 * 1024))
}
