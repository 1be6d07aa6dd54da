//! 视图到 HTTP 响应的转换

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::error;

use super::{View, templates};
use crate::errors::OesError;
use crate::utils::{FlashMessages, get_config, get_renderer};

/// 以 200 渲染视图
pub fn render(req: &HttpRequest, view: View) -> HttpResponse {
    render_with_status(req, StatusCode::OK, view)
}

/// 渲染视图，并取出上一次重定向留下的提示消息
pub fn render_with_status(req: &HttpRequest, status: StatusCode, mut view: View) -> HttpResponse {
    let config = get_config(req);
    let pending = FlashMessages::from_request(req, &config).into_vec();
    if !pending.is_empty() {
        let own = std::mem::take(&mut view.flashes);
        view.flashes = pending;
        view.flashes.extend(own);
    }

    let rendered = match get_renderer(req).render(&view) {
        Ok(rendered) => rendered,
        Err(e) => {
            error!("Failed to render view '{}': {}", view.template, e);
            return HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Internal Server Error");
        }
    };

    let mut builder = HttpResponse::build(status);
    if FlashMessages::present_in(req) {
        builder.cookie(FlashMessages::removal_cookie());
    }
    builder
        .content_type(rendered.content_type)
        .body(rendered.body)
}

/// 303 重定向
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// 303 重定向并写入 Cookie（登录、注销）
pub fn redirect_with_cookie(location: &str, cookie: Cookie<'static>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .cookie(cookie)
        .finish()
}

/// 303 重定向并携带提示消息
pub fn redirect_with_flash(
    req: &HttpRequest,
    location: &str,
    flashes: impl Into<FlashMessages>,
) -> HttpResponse {
    let config = get_config(req);
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, location.to_string()));
    if let Some(cookie) = flashes.into().to_cookie(&config) {
        builder.cookie(cookie);
    }
    builder.finish()
}

#[derive(Serialize)]
struct ErrorContext<'a> {
    code: &'a str,
    error_type: &'a str,
    message: &'a str,
}

/// 渲染错误页，服务端故障不向客户端暴露细节
pub fn error_page(req: &HttpRequest, err: &OesError) -> HttpResponse {
    let message = if err.is_fatal() {
        error!("{} {} failed: {}", req.method(), req.path(), err);
        "Internal server error"
    } else {
        err.message()
    };

    let context = ErrorContext {
        code: err.code(),
        error_type: err.error_type(),
        message,
    };
    match View::new(templates::ERROR).with_context(&context) {
        Ok(view) => render_with_status(req, err.status(), view),
        Err(e) => {
            error!("Failed to build error view: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
