pub mod local;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Uploaded media, addressed by a relative path such as `{session_id}/3.webm`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write (or overwrite) `path` and return a URL the admin can play back.
    async fn put(&self, path: &str, content_type: &str, data: Bytes) -> Result<String>;

    /// Remove every blob under `prefix/`. Returns how many were removed.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize>;
}

/// Storage key for one answer video.
pub fn video_path(session_id: &uuid::Uuid, question_number: i32, extension: &str) -> String {
    format!("{}/{}.{}", session_id, question_number, extension)
}

/// Rejects keys that could escape the store root.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(crate::error::Error::BadRequest(format!(
            "Invalid storage path: {}",
            key
        )));
    }
    Ok(())
}
