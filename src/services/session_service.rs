use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::store::SessionStore;
use crate::dto::session_dto::{CreateSessionRequest, CreateSessionResponse, SessionWithResponses};
use crate::error::{Error, Result};
use crate::models::test_session::{NewSession, TestSession};
use crate::services::question_catalog::TOTAL_QUESTIONS;
use crate::storage::BlobStore;
use crate::utils::token::generate_access_token;

const TOKEN_BYTES: usize = 16;
const TOKEN_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    blobs: Arc<dyn BlobStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    pub async fn create_session(
        &self,
        req: CreateSessionRequest,
        url_for: impl Fn(&str) -> String,
    ) -> Result<CreateSessionResponse> {
        req.validate()?;
        let name = req.candidate_name.trim().to_string();
        let email = req.candidate_email.trim().to_string();

        for attempt in 1..=TOKEN_ATTEMPTS {
            let token = generate_access_token(TOKEN_BYTES);
            let new = NewSession {
                token: token.clone(),
                candidate_name: name.clone(),
                candidate_email: email.clone(),
            };
            match self.store.create_session(new).await {
                Ok(session) => {
                    tracing::info!(session_id = %session.id, "session created");
                    let url = url_for(&token);
                    return Ok(CreateSessionResponse {
                        session,
                        token,
                        url,
                    });
                }
                Err(Error::Conflict(_)) => {
                    tracing::warn!(attempt, "token collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::Internal(
            "could not generate a unique session token".to_string(),
        ))
    }

    pub async fn get_session(&self, id: Uuid) -> Result<TestSession> {
        self.store
            .get_session(id)
            .await?
            .ok_or_else(|| Error::NotFound("Session not found".to_string()))
    }

    pub async fn get_with_responses(&self, id: Uuid) -> Result<SessionWithResponses> {
        let session = self.get_session(id).await?;
        let responses = self.store.list_responses(session.id).await?;
        Ok(SessionWithResponses { session, responses })
    }

    pub async fn get_by_token(&self, token: &str) -> Result<SessionWithResponses> {
        let session = self
            .store
            .get_session_by_token(token)
            .await?
            .ok_or_else(|| Error::NotFound("Session not found".to_string()))?;
        let responses = self.store.list_responses(session.id).await?;
        Ok(SessionWithResponses { session, responses })
    }

    pub async fn complete(&self, session_id: Uuid) -> Result<TestSession> {
        let session = self
            .store
            .mark_completed(session_id, TOTAL_QUESTIONS)
            .await?
            .ok_or_else(|| Error::NotFound("Session not found".to_string()))?;
        tracing::info!(session_id = %session.id, "session completed");
        Ok(session)
    }

    /// Videos are removed before the row; a storage failure leaves the session in place.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.get_session(id).await?;
        let removed = self.blobs.delete_prefix(&id.to_string()).await?;
        self.store.delete_session(id).await?;
        tracing::info!(session_id = %id, blobs_removed = removed, "session deleted");
        Ok(())
    }
}
