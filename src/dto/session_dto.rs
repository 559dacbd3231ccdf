use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::response::Response;
use crate::models::test_session::TestSession;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 200, message = "candidate_name is required"))]
    pub candidate_name: String,
    #[validate(email(message = "candidate_email must be a valid email"))]
    pub candidate_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session: TestSession,
    pub token: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWithResponses {
    pub session: TestSession,
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteSessionRequest {
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
