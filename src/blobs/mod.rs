//! Blob 存储
//!
//! 上传的名单文件和 PDF 附件按生成的键保存，原始文件名只作为展示信息保留，
//! 同名文件不会互相覆盖。

mod local;
mod memory;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::errors::{OesError, Result};

static BLOB_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+-[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.bin$")
        .expect("Invalid blob key regex")
});

/// 已保存的 Blob
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredBlob {
    pub key: String,
    pub original_name: String,
    pub size: usize,
}

#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    // 保存内容，返回生成的键
    async fn save(&self, original_name: &str, content: &[u8]) -> Result<StoredBlob>;
    // 按键读取内容
    async fn read(&self, key: &str) -> Result<Vec<u8>>;
    // 键是否存在
    async fn exists(&self, key: &str) -> Result<bool>;
}

/// 生成新的 Blob 键
pub fn generate_blob_key() -> String {
    format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4())
}

/// 校验键格式，拒绝任何可能逃出上传目录的输入
pub fn validate_blob_key(key: &str) -> Result<()> {
    if BLOB_KEY_RE.is_match(key) {
        Ok(())
    } else {
        Err(OesError::validation(format!("Invalid blob key: {key}")))
    }
}

/// 根据配置创建 Blob 存储
pub fn create_blob_store(config: &UploadConfig) -> Result<Arc<dyn BlobStore>> {
    match config.backend.as_str() {
        "local" => Ok(Arc::new(LocalBlobStore::new(&config.dir)?)),
        "memory" => Ok(Arc::new(MemoryBlobStore::new())),
        other => Err(OesError::validation(format!(
            "Unknown upload backend '{other}', expected 'local' or 'memory'"
        ))),
    }
}
