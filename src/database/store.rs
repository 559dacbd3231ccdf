use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::response::{Response, ResponseUpsert};
use crate::models::test_session::{NewSession, TestSession};

/// Sessions and their per-question responses.
///
/// Responses are keyed by `(session_id, question_number)`; `upsert_response`
/// overwrites in place. Deleting a session removes its responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a session. A duplicate token yields `Error::Conflict`.
    async fn create_session(&self, new: NewSession) -> Result<TestSession>;

    async fn get_session(&self, id: Uuid) -> Result<Option<TestSession>>;

    async fn get_session_by_token(&self, token: &str) -> Result<Option<TestSession>>;

    /// All sessions, newest first.
    async fn list_sessions(&self) -> Result<Vec<TestSession>>;

    /// Returns `true` if a session was removed.
    async fn delete_session(&self, id: Uuid) -> Result<bool>;

    /// Stamp `started_at` if unset and raise `current_question` to at least
    /// `question_number`. No-op on completed sessions.
    async fn record_progress(&self, id: Uuid, question_number: i32) -> Result<()>;

    /// Set `completed_at` (first call wins) and force `current_question`.
    async fn mark_completed(&self, id: Uuid, final_question: i32) -> Result<Option<TestSession>>;

    async fn upsert_response(&self, upsert: ResponseUpsert) -> Result<Response>;

    /// Responses ordered by question number.
    async fn list_responses(&self, session_id: Uuid) -> Result<Vec<Response>>;

    async fn count_responses(&self, session_id: Uuid) -> Result<i64>;
}
