use std::sync::Arc;

use uuid::Uuid;

use crate::database::store::SessionStore;
use crate::dto::response_dto::{SubmitTextRequest, VideoContainer, VideoUpload};
use crate::error::{Error, Result};
use crate::models::response::{Response, ResponseUpsert};
use crate::models::test_session::TestSession;
use crate::services::question_catalog;
use crate::storage::{video_path, BlobStore};

#[derive(Clone)]
pub struct ResponseService {
    store: Arc<dyn SessionStore>,
    blobs: Arc<dyn BlobStore>,
}

impl ResponseService {
    pub fn new(store: Arc<dyn SessionStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    pub async fn submit_text(&self, req: SubmitTextRequest) -> Result<Response> {
        let (Some(session_id), Some(question_number)) = (req.session_id, req.question_number)
        else {
            return Err(Error::BadRequest(
                "session_id and question_number are required".to_string(),
            ));
        };
        check_question_number(question_number)?;
        self.open_session(session_id).await?;

        let response = self
            .store
            .upsert_response(ResponseUpsert::Text {
                session_id,
                question_number,
                text_response: req.text_response,
            })
            .await?;
        self.store.record_progress(session_id, question_number).await?;
        tracing::info!(%session_id, question_number, "text response saved");
        Ok(response)
    }

    pub async fn submit_video(&self, upload: VideoUpload) -> Result<Response> {
        check_question_number(upload.question_number)?;
        if upload.data.is_empty() {
            return Err(Error::BadRequest("video file is empty".to_string()));
        }
        if upload.duration_seconds.map_or(false, |d| d < 0) {
            return Err(Error::BadRequest("duration must not be negative".to_string()));
        }
        self.open_session(upload.session_id).await?;

        let container =
            VideoContainer::detect(upload.content_type.as_deref(), upload.file_name.as_deref());
        let path = video_path(
            &upload.session_id,
            upload.question_number,
            container.extension(),
        );
        tracing::info!(
            path = %path,
            content_type = container.mime(),
            size = upload.data.len(),
            "storing video"
        );
        let video_url = self.blobs.put(&path, container.mime(), upload.data).await?;

        let response = self
            .store
            .upsert_response(ResponseUpsert::Video {
                session_id: upload.session_id,
                question_number: upload.question_number,
                video_url,
                duration_seconds: upload.duration_seconds,
            })
            .await?;
        self.store
            .record_progress(upload.session_id, upload.question_number)
            .await?;
        Ok(response)
    }

    pub async fn list(&self, session_id: Uuid) -> Result<Vec<Response>> {
        self.store.list_responses(session_id).await
    }

    async fn open_session(&self, session_id: Uuid) -> Result<TestSession> {
        let session = self
            .store
            .get_session(session_id)
            .await?
            .ok_or_else(|| Error::NotFound("Session not found".to_string()))?;
        if session.is_completed() {
            return Err(Error::Conflict("Session has already been completed".to_string()));
        }
        Ok(session)
    }
}

fn check_question_number(number: i32) -> Result<()> {
    if question_catalog::is_valid_number(number) {
        Ok(())
    } else {
        Err(Error::BadRequest(format!(
            "question_number must be between 1 and {}",
            question_catalog::TOTAL_QUESTIONS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::models::test_session::NewSession;
    use crate::storage::memory::MemoryBlobStore;
    use bytes::Bytes;

    async fn setup() -> (ResponseService, Arc<MemoryStore>, Arc<MemoryBlobStore>, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let session = store
            .create_session(NewSession {
                token: "tok".into(),
                candidate_name: "Alice".into(),
                candidate_email: "alice@example.com".into(),
            })
            .await
            .unwrap();
        (
            ResponseService::new(store.clone(), blobs.clone()),
            store,
            blobs,
            session.id,
        )
    }

    fn text(session_id: Uuid, n: i32, body: &str) -> SubmitTextRequest {
        SubmitTextRequest {
            session_id: Some(session_id),
            question_number: Some(n),
            text_response: Some(body.into()),
        }
    }

    #[tokio::test]
    async fn resubmission_overwrites() {
        let (svc, store, _, id) = setup().await;
        svc.submit_text(text(id, 6, "first")).await.unwrap();
        svc.submit_text(text(id, 6, "second")).await.unwrap();

        let responses = svc.list(id).await.unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].text_response.as_deref(), Some("second"));

        let session = store.get_session(id).await.unwrap().unwrap();
        assert!(session.started_at.is_some());
        assert_eq!(session.current_question, 6);
    }

    #[tokio::test]
    async fn missing_identifiers_are_bad_requests() {
        let (svc, _, _, id) = setup().await;
        let err = svc
            .submit_text(SubmitTextRequest {
                session_id: Some(id),
                question_number: None,
                text_response: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
        assert!(matches!(
            svc.submit_text(text(id, 37, "x")).await,
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            svc.submit_text(text(Uuid::new_v4(), 1, "x")).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn video_lands_under_session_and_question() {
        let (svc, _, blobs, id) = setup().await;
        let response = svc
            .submit_video(VideoUpload {
                session_id: id,
                question_number: 3,
                duration_seconds: Some(42),
                file_name: Some("q3.mp4".into()),
                content_type: Some("video/mp4".into()),
                data: Bytes::from_static(b"mp4data"),
            })
            .await
            .unwrap();

        let path = format!("{}/3.mp4", id);
        assert_eq!(response.video_url, Some(format!("memory://{}", path)));
        assert_eq!(response.duration_seconds, Some(42));
        let blob = blobs.get(&path).await.unwrap();
        assert_eq!(blob.content_type, "video/mp4");
    }

    #[tokio::test]
    async fn completed_sessions_are_closed() {
        let (svc, store, _, id) = setup().await;
        store.mark_completed(id, 36).await.unwrap();
        assert!(matches!(
            svc.submit_text(text(id, 1, "late")).await,
            Err(Error::Conflict(_))
        ));
    }
}
