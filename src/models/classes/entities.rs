use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称（唯一）
    pub name: String,
    // 科目
    pub subject: String,
    // 教师ID
    pub teacher_id: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
