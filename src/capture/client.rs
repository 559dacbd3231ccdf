use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use uuid::Uuid;

use super::device::RecordedMedia;
use super::{CaptureError, CaptureResult};
use crate::config::ClientConfig;
use crate::dto::session_dto::SessionWithResponses;

/// The public endpoints the capture flow talks to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateApi: Send + Sync {
    async fn fetch_session(&self, token: &str) -> CaptureResult<SessionWithResponses>;

    /// One upload attempt, no retry.
    async fn upload_video(
        &self,
        session_id: Uuid,
        question_number: i32,
        duration_seconds: u32,
        media: &RecordedMedia,
    ) -> CaptureResult<String>;

    async fn submit_text(
        &self,
        session_id: Uuid,
        question_number: i32,
        text: &str,
    ) -> CaptureResult<()>;

    async fn complete(&self, session_id: Uuid) -> CaptureResult<()>;
}

#[derive(Clone)]
pub struct HttpCandidateApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCandidateApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn from_config(config: &ClientConfig) -> CaptureResult<Self> {
        // per-attempt timeouts are applied by the retry loop
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self::with_client(http, config.base_url.clone()))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(resp: reqwest::Response) -> CaptureResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body: serde_json::Value = resp.json().await.unwrap_or_default();
        let message = body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"))
            .to_string();
        Err(CaptureError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CandidateApi for HttpCandidateApi {
    async fn fetch_session(&self, token: &str) -> CaptureResult<SessionWithResponses> {
        let resp = self
            .http
            .get(self.url(&format!("/api/public/sessions/{}", token)))
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn upload_video(
        &self,
        session_id: Uuid,
        question_number: i32,
        duration_seconds: u32,
        media: &RecordedMedia,
    ) -> CaptureResult<String> {
        let part = Part::bytes(media.data.to_vec())
            .file_name(format!("q{}.{}", question_number, media.extension()))
            .mime_str(&media.mime_type)?;
        let form = Form::new()
            .part("video", part)
            .text("session_id", session_id.to_string())
            .text("question_number", question_number.to_string())
            .text("duration", duration_seconds.to_string());

        let resp = self
            .http
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        let body: serde_json::Value = Self::check(resp).await?.json().await?;
        Ok(body
            .get("video_url")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }

    async fn submit_text(
        &self,
        session_id: Uuid,
        question_number: i32,
        text: &str,
    ) -> CaptureResult<()> {
        let resp = self
            .http
            .post(self.url("/api/responses"))
            .json(&json!({
                "session_id": session_id,
                "question_number": question_number,
                "text_response": text,
            }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn complete(&self, session_id: Uuid) -> CaptureResult<()> {
        let resp = self
            .http
            .post(self.url("/api/complete"))
            .json(&json!({ "session_id": session_id }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}
