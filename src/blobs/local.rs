use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{BlobStore, StoredBlob, generate_blob_key, validate_blob_key};
use crate::errors::{OesError, Result};

/// 单一平铺目录的本地文件存储
pub struct LocalBlobStore {
    dir: PathBuf,
}

impl LocalBlobStore {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        // 确保上传目录存在
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                OesError::file_operation(format!("创建上传目录失败 {}: {e}", dir.display()))
            })?;
        }
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_blob_key(key)?;
        Ok(self.dir.join(key))
    }
}

#[async_trait::async_trait]
impl BlobStore for LocalBlobStore {
    async fn save(&self, original_name: &str, content: &[u8]) -> Result<StoredBlob> {
        let key = generate_blob_key();
        let path = self.path_for(&key)?;
        fs::write(&path, content)
            .map_err(|e| OesError::file_operation(format!("写入文件失败 {key}: {e}")))?;
        debug!("Stored blob {} ({} bytes) for {}", key, content.len(), original_name);

        Ok(StoredBlob {
            key,
            original_name: original_name.to_string(),
            size: content.len(),
        })
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Err(OesError::not_found(format!("Blob {key} not found")));
        }
        fs::read(&path).map_err(|e| OesError::file_operation(format!("读取文件失败 {key}: {e}")))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key)?.exists())
    }
}
