pub mod download;
pub mod notes;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::blobs::BlobStore;
use crate::storage::Storage;

pub struct ModuleService;

impl ModuleService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        crate::utils::get_storage(request)
    }

    pub(crate) fn get_blobs(&self, request: &HttpRequest) -> Arc<dyn BlobStore> {
        crate::utils::get_blobs(request)
    }

    // 上传讲义表单
    pub async fn upload_form(
        &self,
        request: &HttpRequest,
        class_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        upload::upload_form(self, request, class_id, user_id).await
    }

    // 创建模块并上传讲义
    pub async fn upload_notes(
        &self,
        request: &HttpRequest,
        class_id: i64,
        user_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_notes(self, request, class_id, user_id, payload).await
    }

    // 下载模块 PDF
    pub async fn download_pdf(
        &self,
        request: &HttpRequest,
        module_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_pdf(self, request, module_id).await
    }
}
