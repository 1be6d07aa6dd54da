//! 学生存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::Students;
use crate::entity::students::{ActiveModel, Column};
use crate::errors::Result;
use crate::models::students::{entities::Student, requests::CreateStudentRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            class_id: Set(req.class_id),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建学生失败"))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 按姓名 + 邮箱 + 班级匹配学生
    pub async fn find_student_impl(
        &self,
        name: &str,
        email: &str,
        class_id: i64,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Name.eq(name))
            .filter(Column::Email.eq(email))
            .filter(Column::ClassId.eq(class_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出班级学生
    pub async fn list_students_by_class_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        let students = Students::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询学生列表失败"))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }
}
