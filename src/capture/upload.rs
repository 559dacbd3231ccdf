use std::time::Duration;

use uuid::Uuid;

use super::client::CandidateApi;
use super::device::RecordedMedia;
use super::CaptureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub timeout: Duration,
    /// Multiplied by the attempt number between tries.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            timeout: Duration::from_secs(60),
            backoff: Duration::from_secs(1),
        }
    }
}

/// Upload one recording, retrying on failure or timeout. Returns the stored
/// URL, or `None` once every attempt failed.
pub async fn upload_with_retry<A: CandidateApi + ?Sized>(
    api: &A,
    policy: &RetryPolicy,
    session_id: Uuid,
    question_number: i32,
    duration_seconds: u32,
    media: &RecordedMedia,
) -> Option<String> {
    let attempts = policy.attempts.max(1);
    for attempt in 1..=attempts {
        let result = tokio::time::timeout(
            policy.timeout,
            api.upload_video(session_id, question_number, duration_seconds, media),
        )
        .await
        .unwrap_or(Err(CaptureError::Timeout(policy.timeout)));

        match result {
            Ok(url) => {
                tracing::info!(question_number, attempt, "video uploaded");
                return Some(url);
            }
            Err(e) => {
                tracing::warn!(question_number, attempt, error = %e, "upload attempt failed");
                if attempt < attempts {
                    tokio::time::sleep(policy.backoff * attempt).await;
                }
            }
        }
    }
    tracing::error!(question_number, attempts, "giving up on upload");
    None
}
