use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireSession;
use crate::services::ModuleService;

// 懒加载的全局 MODULE_SERVICE 实例
static MODULE_SERVICE: Lazy<ModuleService> = Lazy::new(ModuleService::new_lazy);

// HTTP处理程序
pub async fn upload_form(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    MODULE_SERVICE.upload_form(&req, class_id, user_id).await
}

pub async fn upload_notes(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let (class_id, user_id) = path.into_inner();
    MODULE_SERVICE
        .upload_notes(&req, class_id, user_id, payload)
        .await
}

pub async fn download_pdf(req: HttpRequest, module_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    MODULE_SERVICE
        .download_pdf(&req, module_id.into_inner())
        .await
}

// 配置路由
pub fn configure_modules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/upload_notes/{class_id}/{user_id}")
            .wrap(RequireSession::teacher("user_id"))
            .route(web::get().to(upload_form))
            .route(web::post().to(upload_notes)),
    )
    .service(
        web::resource("/module_pdf/{module_id}")
            // 归属在处理程序中判断
            .wrap(RequireSession::any())
            .route(web::get().to(download_pdf)),
    );
}
