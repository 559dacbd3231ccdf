use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::response::Response;

/// Identifiers are optional so a missing one surfaces as our own 400
/// rather than a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTextRequest {
    pub session_id: Option<Uuid>,
    pub question_number: Option<i32>,
    pub text_response: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsesQuery {
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsesList {
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadVideoResponse {
    pub success: bool,
    pub video_url: String,
}

/// A parsed `/api/upload` form.
#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub session_id: Uuid,
    pub question_number: i32,
    pub duration_seconds: Option<i32>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoContainer {
    Mp4,
    Webm,
}

impl VideoContainer {
    /// mp4 when either the part's content type or its file name says so.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Self {
        let by_type = content_type.map_or(false, |t| t.contains("mp4"));
        let by_name = file_name.map_or(false, |n| n.ends_with(".mp4"));
        if by_type || by_name {
            VideoContainer::Mp4
        } else {
            VideoContainer::Webm
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            VideoContainer::Mp4 => "mp4",
            VideoContainer::Webm => "webm",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            VideoContainer::Mp4 => "video/mp4",
            VideoContainer::Webm => "video/webm",
        }
    }
}
