use serde::Serialize;

use super::entities::User;
use crate::models::classes::entities::Class;

// 教师主页
#[derive(Debug, Clone, Serialize)]
pub struct TeacherDashboardResponse {
    pub user: User,
    pub classes: Vec<Class>,
}
