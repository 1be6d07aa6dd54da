//! 路径参数和表单解析错误处理

use actix_web::error::{InternalError, PathError, UrlencodedError};
use actix_web::{Error, HttpRequest};

use crate::errors::OesError;
use crate::views::error_page;

/// 路径中的 ID 不是整数时按 404 处理
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    let response = error_page(req, &OesError::not_found(format!("Invalid path: {err}")));
    InternalError::from_response(err, response).into()
}

/// 表单无法解析
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> Error {
    let response = error_page(req, &OesError::validation(format!("Invalid form: {err}")));
    InternalError::from_response(err, response).into()
}
