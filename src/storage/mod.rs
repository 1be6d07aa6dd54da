use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    classes::{entities::Class, requests::CreateClassRequest},
    modules::{entities::Module, requests::CreateModuleRequest},
    students::{entities::Student, requests::CreateStudentRequest},
    users::{
        entities::{User, UserType},
        requests::CreateUserRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 按用户名、邮箱、类型精确匹配用户
    async fn find_user(
        &self,
        username: &str,
        email: &str,
        user_type: UserType,
    ) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过班级名称获取班级信息
    async fn find_class_by_name(&self, name: &str) -> Result<Option<Class>>;
    // 列出教师的班级
    async fn list_classes_by_teacher(&self, teacher_id: i64) -> Result<Vec<Class>>;

    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生信息
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    // 按姓名、邮箱、班级精确匹配学生
    async fn find_student(
        &self,
        name: &str,
        email: &str,
        class_id: i64,
    ) -> Result<Option<Student>>;
    // 列出班级学生
    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>>;

    /// 课程模块管理方法
    // 创建模块
    async fn create_module(&self, module: CreateModuleRequest) -> Result<Module>;
    // 通过ID获取模块信息
    async fn get_module_by_id(&self, module_id: i64) -> Result<Option<Module>>;
    // 列出班级模块
    async fn list_modules_by_class(&self, class_id: i64) -> Result<Vec<Module>>;
    // 追加讲义文本
    async fn append_module_notes(&self, module_id: i64, fragment: &str) -> Result<Module>;
    // 设置模块 PDF
    async fn set_module_pdf(&self, module_id: i64, file_name: &str, blob_key: &str)
    -> Result<Module>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
