use serde::Deserialize;

// 创建学生请求（名单导入）
#[derive(Debug, Clone, PartialEq)]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub class_id: i64,
}

// 学生登录表单
#[derive(Debug, Default, Deserialize)]
pub struct StudentLoginForm {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: String,
}
