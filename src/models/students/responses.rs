use serde::Serialize;

use super::entities::Student;
use crate::models::classes::entities::Class;
use crate::models::modules::entities::Module;

// 学生主页
#[derive(Debug, Clone, Serialize)]
pub struct StudentDashboardResponse {
    pub class: Class,
    pub student: Student,
    pub modules: Vec<Module>,
}
