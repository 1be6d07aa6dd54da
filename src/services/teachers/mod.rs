pub mod dashboard;
pub mod login;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::TeacherLoginForm;
use crate::storage::Storage;

pub struct TeacherService;

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        crate::utils::get_storage(request)
    }

    // 教师登录页
    pub async fn login_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        login::login_form(self, request).await
    }

    // 教师登录
    pub async fn login(
        &self,
        request: &HttpRequest,
        form: TeacherLoginForm,
    ) -> ActixResult<HttpResponse> {
        login::login(self, request, form).await
    }

    // 教师主页
    pub async fn dashboard(&self, request: &HttpRequest, user_id: i64) -> ActixResult<HttpResponse> {
        dashboard::dashboard(self, request, user_id).await
    }
}
