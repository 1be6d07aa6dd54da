use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireSession;
use crate::services::ClassService;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn create_class_form(
    req: HttpRequest,
    user_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class_form(&req, user_id.into_inner())
        .await
}

pub async fn create_class(
    req: HttpRequest,
    user_id: web::Path<i64>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, user_id.into_inner(), payload)
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/create_class/{user_id}")
            // 只有本人可以创建班级
            .wrap(RequireSession::teacher("user_id"))
            .route(web::get().to(create_class_form))
            .route(web::post().to(create_class)),
    );
}
