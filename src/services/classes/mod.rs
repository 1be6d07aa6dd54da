pub mod create;
pub mod import;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::blobs::BlobStore;
use crate::storage::Storage;

pub struct ClassService;

impl ClassService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        crate::utils::get_storage(request)
    }

    pub(crate) fn get_blobs(&self, request: &HttpRequest) -> Arc<dyn BlobStore> {
        crate::utils::get_blobs(request)
    }

    // 创建班级表单
    pub async fn create_class_form(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        create::create_class_form(self, request, user_id).await
    }

    // 创建班级，可附带学生名单
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        user_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, user_id, payload).await
    }
}
