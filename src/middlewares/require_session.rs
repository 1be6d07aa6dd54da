/*!
 * 会话校验中间件
 *
 * 包裹单个资源，校验会话 Cookie 中的身份与路径参数一致。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireSession;
 *
 * cfg.service(
 *     web::resource("/teacher_dashboard/{user_id}")
 *         .wrap(RequireSession::teacher("user_id"))
 *         .route(web::get().to(dashboard)),
 * );
 * ```
 *
 * 处理程序中读取身份：
 *
 * ```rust,ignore
 * if let Some(identity) = RequireSession::extract_identity(&req) {
 *     // ...
 * }
 * ```
 *
 * ## 校验流程
 *
 * 1. 没有 Cookie 或令牌无效时，303 重定向到对应的登录页并写入提示消息
 * 2. 令牌有效但身份与路径参数不一致时返回 403
 * 3. 校验通过后将身份存入请求扩展
 *
 * `session.enforce = false` 时只附加身份，不做拦截。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

use crate::errors::OesError;
use crate::utils::{SessionIdentity, SessionUtils, get_config};
use crate::views::{error_page, redirect_with_flash};

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in first.";

#[derive(Debug, Clone, Copy)]
enum Requirement {
    Teacher {
        user_id: &'static str,
    },
    Student {
        class_id: &'static str,
        student_id: &'static str,
    },
    Any,
}

enum Outcome {
    Allow(SessionIdentity),
    /// 路径参数不是整数，交给处理程序返回 404
    PassThrough,
    Forbidden,
}

#[derive(Debug, Clone, Copy)]
pub struct RequireSession {
    requirement: Requirement,
}

impl RequireSession {
    /// 教师会话，`sub` 必须等于指定的路径参数
    pub fn teacher(user_id: &'static str) -> Self {
        Self {
            requirement: Requirement::Teacher { user_id },
        }
    }

    /// 学生会话，学生 ID 和班级 ID 都必须与路径一致
    pub fn student(class_id: &'static str, student_id: &'static str) -> Self {
        Self {
            requirement: Requirement::Student {
                class_id,
                student_id,
            },
        }
    }

    /// 任意有效会话，归属由处理程序判断
    pub fn any() -> Self {
        Self {
            requirement: Requirement::Any,
        }
    }

    /// 从请求扩展中提取会话身份
    pub fn extract_identity(req: &HttpRequest) -> Option<SessionIdentity> {
        req.extensions().get::<SessionIdentity>().copied()
    }

    fn login_path(&self) -> &'static str {
        match self.requirement {
            Requirement::Teacher { .. } => "/teacher_login",
            Requirement::Student { .. } => "/student_login",
            Requirement::Any => "/",
        }
    }

    /// 路径参数是否都是整数
    fn params_are_numeric(&self, req: &ServiceRequest) -> bool {
        let numeric = |name: &str| {
            req.match_info()
                .get(name)
                .is_some_and(|v| v.parse::<i64>().is_ok())
        };
        match self.requirement {
            Requirement::Any => true,
            Requirement::Teacher { user_id } => numeric(user_id),
            Requirement::Student {
                class_id,
                student_id,
            } => numeric(class_id) && numeric(student_id),
        }
    }

    fn check(&self, req: &ServiceRequest, identity: SessionIdentity) -> Outcome {
        let param = |name: &str| req.match_info().get(name).and_then(|v| v.parse::<i64>().ok());

        match self.requirement {
            Requirement::Any => Outcome::Allow(identity),
            Requirement::Teacher { user_id } => match param(user_id) {
                None => Outcome::PassThrough,
                Some(id) if identity.is_teacher(id) => Outcome::Allow(identity),
                Some(_) => Outcome::Forbidden,
            },
            Requirement::Student {
                class_id,
                student_id,
            } => match (param(class_id), param(student_id)) {
                (Some(cid), Some(sid)) if identity.is_student(sid, cid) => {
                    Outcome::Allow(identity)
                }
                (Some(_), Some(_)) => Outcome::Forbidden,
                _ => Outcome::PassThrough,
            },
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
            guard: *self,
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
    guard: RequireSession,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let guard = self.guard;

        Box::pin(async move {
            let config = get_config(req.request());
            let identity = SessionUtils::extract_identity(req.request(), &config);

            // 不强制校验时只附加身份
            if !config.session.enforce {
                if let Some(identity) = identity {
                    req.extensions_mut().insert(identity);
                }
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            // 非数字 ID 交给处理程序返回 404
            if !guard.params_are_numeric(&req) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let Some(identity) = identity else {
                info!("No valid session for request to {}", req.path());
                let response = redirect_with_flash(
                    req.request(),
                    guard.login_path(),
                    LOGIN_REQUIRED_MESSAGE,
                );
                return Ok(req.into_response(response.map_into_right_body()));
            };

            match guard.check(&req, identity) {
                Outcome::Allow(identity) => {
                    debug!("Session accepted for {:?}", identity);
                    req.extensions_mut().insert(identity);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Outcome::PassThrough => Ok(srv.call(req).await?.map_into_left_body()),
                Outcome::Forbidden => {
                    info!(
                        "Session {:?} is not allowed to access {}",
                        identity,
                        req.path()
                    );
                    let response = error_page(
                        req.request(),
                        &OesError::authorization("You are not allowed to access this page."),
                    );
                    Ok(req.into_response(response.map_into_right_body()))
                }
            }
        })
    }
}
