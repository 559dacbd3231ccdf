use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Browser calls come from the candidate/admin front end at `origin`.
/// An origin that is not a valid header value falls back to allowing any.
pub fn cors_for_origin(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!(origin, "invalid PUBLIC_ORIGIN for CORS, allowing any origin");
            layer.allow_origin(Any)
        }
    }
}
