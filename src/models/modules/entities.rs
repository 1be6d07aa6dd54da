use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub id: i64,
    pub name: String,
    pub class_id: i64,
    // 累积的讲义文本
    pub notes: String,
    // PDF 原始文件名，仅用于展示
    pub pdf_file: Option<String>,
    // PDF 在 Blob 存储中的键
    #[serde(skip_serializing, default)]
    pub pdf_blob_key: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
