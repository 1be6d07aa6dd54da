// 创建班级请求
#[derive(Debug, Clone)]
pub struct CreateClassRequest {
    pub name: String,
    pub subject: String,
    pub teacher_id: i64,
}
