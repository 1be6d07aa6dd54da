use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireSession;
use crate::models::users::requests::TeacherLoginForm;
use crate::services::TeacherService;

// 懒加载的全局 TEACHER_SERVICE 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

// HTTP处理程序
pub async fn login_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.login_form(&req).await
}

pub async fn login(
    req: HttpRequest,
    form: web::Form<TeacherLoginForm>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.login(&req, form.into_inner()).await
}

pub async fn dashboard(req: HttpRequest, user_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.dashboard(&req, user_id.into_inner()).await
}

// 配置路由
pub fn configure_teachers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/teacher_login")
            .route(web::get().to(login_form))
            .route(web::post().to(login)),
    )
    .service(
        web::resource("/teacher_dashboard/{user_id}")
            .wrap(RequireSession::teacher("user_id"))
            .route(web::get().to(dashboard)),
    );
}
