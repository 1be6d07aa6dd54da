use serde::Serialize;

// 创建班级表单
#[derive(Debug, Clone, Serialize)]
pub struct CreateClassFormResponse {
    pub user_id: i64,
}
