use dashmap::DashMap;

use super::{BlobStore, StoredBlob, generate_blob_key, validate_blob_key};
use crate::errors::{OesError, Result};

/// 内存 Blob 存储（测试或临时运行）
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryBlobStore {
    async fn save(&self, original_name: &str, content: &[u8]) -> Result<StoredBlob> {
        let key = generate_blob_key();
        self.blobs.insert(key.clone(), content.to_vec());

        Ok(StoredBlob {
            key,
            original_name: original_name.to_string(),
            size: content.len(),
        })
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        validate_blob_key(key)?;
        self.blobs
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| OesError::not_found(format!("Blob {key} not found")))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        validate_blob_key(key)?;
        Ok(self.blobs.contains_key(key))
    }
}
