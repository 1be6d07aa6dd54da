use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    // 学生邮箱（全局唯一）
    pub email: String,
    pub class_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
