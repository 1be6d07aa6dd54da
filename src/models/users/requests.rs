use serde::Deserialize;

use super::entities::UserType;

// 创建用户请求（启动时写入教师账号）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub user_type: UserType,
}

// 教师登录表单
#[derive(Debug, Default, Deserialize)]
pub struct TeacherLoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}
