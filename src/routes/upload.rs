use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::dto::response_dto::{UploadVideoResponse, VideoUpload};
use crate::error::{Error, Result};
use crate::AppState;

/// `multipart/form-data` with `video`, `session_id`, `question_number` and an
/// optional `duration` in seconds.
#[axum::debug_handler]
pub async fn upload_video(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    let mut multipart = multipart?;
    let mut video = None;
    let mut session_id: Option<String> = None;
    let mut question_number: Option<String> = None;
    let mut duration: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "video" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                video = Some((file_name, content_type, data));
            }
            "session_id" => session_id = Some(field.text().await?),
            "question_number" => question_number = Some(field.text().await?),
            "duration" => duration = Some(field.text().await?),
            other => tracing::debug!(field = other, "ignoring unknown upload field"),
        }
    }

    let (Some((file_name, content_type, data)), Some(session_id), Some(question_number)) =
        (video, session_id, question_number)
    else {
        return Err(Error::BadRequest(
            "video, session_id and question_number are required".to_string(),
        ));
    };

    let session_id = Uuid::parse_str(session_id.trim())
        .map_err(|_| Error::BadRequest("session_id must be a UUID".to_string()))?;
    let question_number: i32 = question_number
        .trim()
        .parse()
        .map_err(|_| Error::BadRequest("question_number must be an integer".to_string()))?;
    let duration_seconds = match duration.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i32>()
                .map_err(|_| Error::BadRequest("duration must be an integer".to_string()))?,
        ),
    };

    let response = state
        .response_service
        .submit_video(VideoUpload {
            session_id,
            question_number,
            duration_seconds,
            file_name,
            content_type,
            data,
        })
        .await?;

    Ok(Json(UploadVideoResponse {
        success: true,
        video_url: response.video_url.unwrap_or_default(),
    }))
}
