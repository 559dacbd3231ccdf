use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

pub fn issue_admin_token(secret: &str, ttl_hours: i64) -> Result<(String, DateTime<Utc>)> {
    let expires_at = Utc::now() + Duration::hours(ttl_hours);
    let claims = Claims {
        sub: ADMIN_ROLE.to_string(),
        exp: expires_at.timestamp() as usize,
        role: Some(ADMIN_ROLE.to_string()),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, expires_at))
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

fn bearer_token(req: &Request) -> std::result::Result<&str, &'static str> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("missing_authorization")?;
    let value = header.to_str().map_err(|_| "bad_authorization")?;
    value.strip_prefix("Bearer ").ok_or("unsupported_scheme")
}

pub async fn require_admin(mut req: Request, next: Next) -> Response {
    let token = match bearer_token(&req) {
        Ok(token) => token,
        Err(code) => return unauthorized(code),
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => {
            let role = data.claims.role.clone().unwrap_or_default();
            if !role.eq_ignore_ascii_case(ADMIN_ROLE) {
                return (StatusCode::FORBIDDEN, Json(json!({"error":"forbidden"}))).into_response();
            }
            req.extensions_mut().insert(data.claims);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected admin token");
            unauthorized("invalid_token")
        }
    }
}
