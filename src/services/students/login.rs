use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::errors::OesError;
use crate::models::students::requests::StudentLoginForm;
use crate::utils::{SessionIdentity, SessionUtils, get_config};
use crate::views::{View, error_page, redirect_with_cookie, render, templates};

pub const INVALID_CLASS_MESSAGE: &str = "Invalid class name.";
pub const INVALID_STUDENT_MESSAGE: &str = "Invalid student name or email.";

fn rejected(request: &HttpRequest, message: &str) -> HttpResponse {
    render(request, View::new(templates::STUDENT_LOGIN).flash(message))
}

pub async fn login_form(
    _service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(render(request, View::new(templates::STUDENT_LOGIN)))
}

pub async fn login(
    service: &StudentService,
    request: &HttpRequest,
    form: StudentLoginForm,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先按名称匹配班级
    let class = match storage.find_class_by_name(&form.class_name).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            info!("Student login rejected: unknown class '{}'", form.class_name);
            return Ok(rejected(request, INVALID_CLASS_MESSAGE));
        }
        Err(e) => return Ok(error_page(request, &e)),
    };

    // 再按姓名、邮箱匹配班级中的学生
    let student = match storage
        .find_student(&form.student_name, &form.student_email, class.id)
        .await
    {
        Ok(Some(student)) => student,
        Ok(None) => {
            info!("Student login rejected for class {}", class.id);
            return Ok(rejected(request, INVALID_STUDENT_MESSAGE));
        }
        Err(e) => return Ok(error_page(request, &e)),
    };

    let config = get_config(request);
    let identity = SessionIdentity::Student {
        student_id: student.id,
        class_id: class.id,
    };
    let token = match SessionUtils::issue(identity, &config) {
        Ok(token) => token,
        Err(e) => {
            return Ok(error_page(
                request,
                &OesError::serialization(format!("Failed to issue session: {e}")),
            ));
        }
    };

    info!("Student {} logged in to class {}", student.id, class.id);
    Ok(redirect_with_cookie(
        &format!("/student_dashboard/{}/{}", class.id, student.id),
        SessionUtils::create_session_cookie(&token, &config),
    ))
}
