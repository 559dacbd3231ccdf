use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TestSession {
    pub id: Uuid,
    pub token: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub current_question: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TestSession {
    pub fn status(&self) -> SessionStatus {
        if self.completed_at.is_some() {
            SessionStatus::Completed
        } else if self.started_at.is_some() {
            SessionStatus::InProgress
        } else {
            SessionStatus::NotStarted
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Fields supplied by the admin when creating a session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token: String,
    pub candidate_name: String,
    pub candidate_email: String,
}
