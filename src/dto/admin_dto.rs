use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::{Block, Question};
use crate::models::response::Response;
use crate::models::test_session::{SessionStatus, TestSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: i64,
    pub total: i64,
    pub ratio: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionOverview {
    #[serde(flatten)]
    pub session: TestSession,
    pub responses_count: i64,
    pub status: SessionStatus,
    pub progress: Progress,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionList {
    pub sessions: Vec<SessionOverview>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionReview {
    pub question: &'static Question,
    pub level_label: String,
    pub max_recording_seconds: u32,
    pub response: Option<Response>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockReview {
    pub block: &'static Block,
    pub answered: usize,
    pub questions: Vec<QuestionReview>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReview {
    pub session: TestSession,
    pub status: SessionStatus,
    pub progress: Progress,
    pub total_points: i32,
    pub blocks: Vec<BlockReview>,
}
