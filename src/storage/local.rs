use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use super::{check_key, BlobStore};
use crate::error::Result;

/// Files on disk under `root`, served back through `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, path: &str, _content_type: &str, data: Bytes) -> Result<String> {
        check_key(path)?;
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &data).await?;
        tracing::debug!(path = %target.display(), size = data.len(), "blob written");
        Ok(format!("{}/{}", self.public_base, path))
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        check_key(prefix)?;
        let dir = self.root.join(prefix);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                removed += 1;
            }
        }
        tokio::fs::remove_dir_all(&dir).await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_delete_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "https://assess.example.com/uploads/");

        let url = store
            .put("abc/1.webm", "video/webm", Bytes::from_static(b"hello"))
            .await
            .unwrap();
        assert_eq!(url, "https://assess.example.com/uploads/abc/1.webm");
        let on_disk = tokio::fs::read(dir.path().join("abc/1.webm")).await.unwrap();
        assert_eq!(on_disk, b"hello");

        store
            .put("abc/1.webm", "video/webm", Bytes::from_static(b"again"))
            .await
            .unwrap();
        store
            .put("abc/2.mp4", "video/mp4", Bytes::from_static(b"x"))
            .await
            .unwrap();

        assert_eq!(store.delete_prefix("abc").await.unwrap(), 2);
        assert!(!dir.path().join("abc").exists());
        assert_eq!(store.delete_prefix("abc").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "/uploads");
        assert!(store
            .put("../escape.webm", "video/webm", Bytes::new())
            .await
            .is_err());
        assert!(store.delete_prefix("/etc").await.is_err());
    }
}
