use serde::Serialize;

use super::entities::Module;
use crate::models::classes::entities::Class;

// 上传讲义表单
#[derive(Debug, Clone, Serialize)]
pub struct UploadNotesFormResponse {
    pub class: Class,
    pub modules: Vec<Module>,
    pub user_id: i64,
    pub max_pdf_size: usize,
}
