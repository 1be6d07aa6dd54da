//! 课程模块存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::Modules;
use crate::entity::modules::{ActiveModel, Column};
use crate::errors::{OesError, Result};
use crate::models::modules::{entities::Module, requests::CreateModuleRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建模块，讲义初始为空
    pub async fn create_module_impl(&self, req: CreateModuleRequest) -> Result<Module> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            class_id: Set(req.class_id),
            notes: Set(String::new()),
            pdf_file: Set(None),
            pdf_blob_key: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建模块失败"))?;

        Ok(result.into_module())
    }

    /// 通过 ID 获取模块
    pub async fn get_module_by_id_impl(&self, module_id: i64) -> Result<Option<Module>> {
        let result = Modules::find_by_id(module_id)
            .one(&self.db)
            .await
            .map_err(db_error("查询模块失败"))?;

        Ok(result.map(|m| m.into_module()))
    }

    /// 列出班级的模块
    pub async fn list_modules_by_class_impl(&self, class_id: i64) -> Result<Vec<Module>> {
        let modules = Modules::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询模块列表失败"))?;

        Ok(modules.into_iter().map(|m| m.into_module()).collect())
    }

    /// 追加讲义片段
    pub async fn append_module_notes_impl(&self, module_id: i64, fragment: &str) -> Result<Module> {
        let existing = Modules::find_by_id(module_id)
            .one(&self.db)
            .await
            .map_err(db_error("查询模块失败"))?
            .ok_or_else(|| OesError::not_found(format!("Module {module_id} not found")))?;

        let notes = format!("{}{}", existing.notes, fragment);
        let mut model = existing.into_active_model();
        model.notes = Set(notes);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("更新模块讲义失败"))?;

        Ok(result.into_module())
    }

    /// 记录模块 PDF
    pub async fn set_module_pdf_impl(
        &self,
        module_id: i64,
        file_name: &str,
        blob_key: &str,
    ) -> Result<Module> {
        let existing = Modules::find_by_id(module_id)
            .one(&self.db)
            .await
            .map_err(db_error("查询模块失败"))?
            .ok_or_else(|| OesError::not_found(format!("Module {module_id} not found")))?;

        let mut model = existing.into_active_model();
        model.pdf_file = Set(Some(file_name.to_string()));
        model.pdf_blob_key = Set(Some(blob_key.to_string()));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("更新模块 PDF 失败"))?;

        Ok(result.into_module())
    }
}
