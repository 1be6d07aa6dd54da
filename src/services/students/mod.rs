pub mod dashboard;
pub mod login;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::StudentLoginForm;
use crate::storage::Storage;

pub struct StudentService;

impl StudentService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        crate::utils::get_storage(request)
    }

    // 学生登录页
    pub async fn login_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        login::login_form(self, request).await
    }

    // 学生登录
    pub async fn login(
        &self,
        request: &HttpRequest,
        form: StudentLoginForm,
    ) -> ActixResult<HttpResponse> {
        login::login(self, request, form).await
    }

    // 学生主页
    pub async fn dashboard(
        &self,
        request: &HttpRequest,
        class_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        dashboard::dashboard(self, request, class_id, student_id).await
    }
}
