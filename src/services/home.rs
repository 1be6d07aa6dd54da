use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;

use crate::utils::{SessionUtils, get_config};
use crate::views::{View, error_page, redirect_with_cookie, render, templates};

pub struct HomeService;

#[derive(Serialize)]
struct IndexContext<'a> {
    system_name: &'a str,
}

impl HomeService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 首页
    pub async fn index(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let config = get_config(request);
        let context = IndexContext {
            system_name: &config.app.system_name,
        };
        match View::new(templates::INDEX).with_context(&context) {
            Ok(view) => Ok(render(request, view)),
            Err(e) => Ok(error_page(request, &e)),
        }
    }

    // 注销，清除会话 Cookie
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let config = get_config(request);
        Ok(redirect_with_cookie(
            "/",
            SessionUtils::create_empty_session_cookie(&config),
        ))
    }
}
