use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Response {
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_number: i32,
    pub video_url: Option<String>,
    pub text_response: Option<String>,
    pub duration_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// One upsert against the `(session_id, question_number)` key.
///
/// Only the columns named by the variant are written; the others keep
/// whatever an earlier submission stored.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseUpsert {
    Text {
        session_id: Uuid,
        question_number: i32,
        text_response: Option<String>,
    },
    Video {
        session_id: Uuid,
        question_number: i32,
        video_url: String,
        duration_seconds: Option<i32>,
    },
}

impl ResponseUpsert {
    pub fn session_id(&self) -> Uuid {
        match self {
            ResponseUpsert::Text { session_id, .. } | ResponseUpsert::Video { session_id, .. } => {
                *session_id
            }
        }
    }

    pub fn question_number(&self) -> i32 {
        match self {
            ResponseUpsert::Text {
                question_number, ..
            }
            | ResponseUpsert::Video {
                question_number, ..
            } => *question_number,
        }
    }
}
