use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::store::SessionStore;
use crate::error::{Error, Result};
use crate::models::response::{Response, ResponseUpsert};
use crate::models::test_session::{NewSession, TestSession};

/// Process-local store with the same semantics as the Postgres tables.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    sessions: HashMap<Uuid, TestSession>,
    responses: HashMap<Uuid, BTreeMap<i32, Response>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, new: NewSession) -> Result<TestSession> {
        let mut inner = self.inner.write().await;
        if inner.sessions.values().any(|s| s.token == new.token) {
            return Err(Error::Conflict("Resource already exists".to_string()));
        }
        let session = TestSession {
            id: Uuid::new_v4(),
            token: new.token,
            candidate_name: new.candidate_name,
            candidate_email: new.candidate_email,
            started_at: None,
            completed_at: None,
            current_question: 1,
            created_at: Utc::now(),
        };
        inner.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: Uuid) -> Result<Option<TestSession>> {
        Ok(self.inner.read().await.sessions.get(&id).cloned())
    }

    async fn get_session_by_token(&self, token: &str) -> Result<Option<TestSession>> {
        let inner = self.inner.read().await;
        Ok(inner.sessions.values().find(|s| s.token == token).cloned())
    }

    async fn list_sessions(&self) -> Result<Vec<TestSession>> {
        let inner = self.inner.read().await;
        let mut sessions: Vec<TestSession> = inner.sessions.values().cloned().collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    async fn delete_session(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        inner.responses.remove(&id);
        Ok(inner.sessions.remove(&id).is_some())
    }

    async fn record_progress(&self, id: Uuid, question_number: i32) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(session) = inner.sessions.get_mut(&id) {
            if session.completed_at.is_none() {
                session.started_at.get_or_insert_with(Utc::now);
                session.current_question = session.current_question.max(question_number);
            }
        }
        Ok(())
    }

    async fn mark_completed(&self, id: Uuid, final_question: i32) -> Result<Option<TestSession>> {
        let mut inner = self.inner.write().await;
        let Some(session) = inner.sessions.get_mut(&id) else {
            return Ok(None);
        };
        let now = Utc::now();
        session.completed_at.get_or_insert(now);
        session.started_at.get_or_insert(now);
        session.current_question = final_question;
        Ok(Some(session.clone()))
    }

    async fn upsert_response(&self, upsert: ResponseUpsert) -> Result<Response> {
        let mut inner = self.inner.write().await;
        let session_id = upsert.session_id();
        if !inner.sessions.contains_key(&session_id) {
            return Err(Error::NotFound("Session not found".to_string()));
        }
        let question_number = upsert.question_number();
        let entry = inner
            .responses
            .entry(session_id)
            .or_default()
            .entry(question_number)
            .or_insert_with(|| Response {
                id: Uuid::new_v4(),
                session_id,
                question_number,
                video_url: None,
                text_response: None,
                duration_seconds: None,
                created_at: Utc::now(),
            });
        match upsert {
            ResponseUpsert::Text { text_response, .. } => {
                entry.text_response = text_response;
            }
            ResponseUpsert::Video {
                video_url,
                duration_seconds,
                ..
            } => {
                entry.video_url = Some(video_url);
                entry.duration_seconds = duration_seconds;
            }
        }
        entry.created_at = Utc::now();
        Ok(entry.clone())
    }

    async fn list_responses(&self, session_id: Uuid) -> Result<Vec<Response>> {
        let inner = self.inner.read().await;
        Ok(inner
            .responses
            .get(&session_id)
            .map(|by_number| by_number.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn count_responses(&self, session_id: Uuid) -> Result<i64> {
        let inner = self.inner.read().await;
        Ok(inner.responses.get(&session_id).map_or(0, |r| r.len() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_session(token: &str) -> NewSession {
        NewSession {
            token: token.to_string(),
            candidate_name: "Alice".into(),
            candidate_email: "alice@example.com".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_tokens_are_rejected() {
        let store = MemoryStore::new();
        store.create_session(new_session("t1")).await.unwrap();
        let err = store.create_session(new_session("t1")).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn text_and_video_upserts_merge_on_one_row() {
        let store = MemoryStore::new();
        let s = store.create_session(new_session("t2")).await.unwrap();

        store
            .upsert_response(ResponseUpsert::Video {
                session_id: s.id,
                question_number: 4,
                video_url: "http://x/4.webm".into(),
                duration_seconds: Some(12),
            })
            .await
            .unwrap();
        let merged = store
            .upsert_response(ResponseUpsert::Text {
                session_id: s.id,
                question_number: 4,
                text_response: Some("notes".into()),
            })
            .await
            .unwrap();

        assert_eq!(merged.video_url.as_deref(), Some("http://x/4.webm"));
        assert_eq!(merged.text_response.as_deref(), Some("notes"));
        assert_eq!(store.count_responses(s.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn progress_never_moves_backwards() {
        let store = MemoryStore::new();
        let s = store.create_session(new_session("t3")).await.unwrap();
        store.record_progress(s.id, 5).await.unwrap();
        store.record_progress(s.id, 2).await.unwrap();
        let s = store.get_session(s.id).await.unwrap().unwrap();
        assert_eq!(s.current_question, 5);
        assert!(s.started_at.is_some());
    }

    #[tokio::test]
    async fn delete_cascades_to_responses() {
        let store = MemoryStore::new();
        let s = store.create_session(new_session("t4")).await.unwrap();
        store
            .upsert_response(ResponseUpsert::Text {
                session_id: s.id,
                question_number: 1,
                text_response: Some("a".into()),
            })
            .await
            .unwrap();
        assert!(store.delete_session(s.id).await.unwrap());
        assert!(store.list_responses(s.id).await.unwrap().is_empty());
        assert!(!store.delete_session(s.id).await.unwrap());
    }
}
