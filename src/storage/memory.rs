use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{check_key, BlobStore};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredBlob {
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<BTreeMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, path: &str) -> Option<StoredBlob> {
        self.blobs.read().await.get(path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, path: &str, content_type: &str, data: Bytes) -> Result<String> {
        check_key(path)?;
        self.blobs.write().await.insert(
            path.to_string(),
            StoredBlob {
                content_type: content_type.to_string(),
                data,
            },
        );
        Ok(format!("memory://{}", path))
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        check_key(prefix)?;
        let dir = format!("{}/", prefix);
        let mut blobs = self.blobs.write().await;
        let before = blobs.len();
        blobs.retain(|key, _| !key.starts_with(&dir));
        Ok(before - blobs.len())
    }
}
