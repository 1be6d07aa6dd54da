use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireSession;
use crate::models::students::requests::StudentLoginForm;
use crate::services::StudentService;

// 懒加载的全局 STUDENT_SERVICE 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// HTTP处理程序
pub async fn login_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.login_form(&req).await
}

pub async fn login(
    req: HttpRequest,
    form: web::Form<StudentLoginForm>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.login(&req, form.into_inner()).await
}

pub async fn dashboard(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (class_id, student_id) = path.into_inner();
    STUDENT_SERVICE.dashboard(&req, class_id, student_id).await
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/student_login")
            .route(web::get().to(login_form))
            .route(web::post().to(login)),
    )
    .service(
        web::resource("/student_dashboard/{class_id}/{student_id}")
            .wrap(RequireSession::student("class_id", "student_id"))
            .route(web::get().to(dashboard)),
    );
}
