use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::errors::OesError;
use crate::models::users::entities::UserType;
use crate::models::users::requests::TeacherLoginForm;
use crate::utils::{SessionIdentity, SessionUtils, get_config};
use crate::views::{View, error_page, redirect_with_cookie, render, templates};

pub const INVALID_TEACHER_MESSAGE: &str = "Invalid username or email.";

pub async fn login_form(
    _service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(render(request, View::new(templates::TEACHER_LOGIN)))
}

pub async fn login(
    service: &TeacherService,
    request: &HttpRequest,
    form: TeacherLoginForm,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage
        .find_user(&form.username, &form.email, UserType::Teacher)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!("Teacher login rejected for username '{}'", form.username);
            return Ok(render(
                request,
                View::new(templates::TEACHER_LOGIN).flash(INVALID_TEACHER_MESSAGE),
            ));
        }
        Err(e) => return Ok(error_page(request, &e)),
    };

    let config = get_config(request);
    let token = match SessionUtils::issue(SessionIdentity::Teacher { user_id: user.id }, &config) {
        Ok(token) => token,
        Err(e) => {
            return Ok(error_page(
                request,
                &OesError::serialization(format!("Failed to issue session: {e}")),
            ));
        }
    };

    info!("Teacher {} (ID: {}) logged in", user.username, user.id);
    Ok(redirect_with_cookie(
        &format!("/teacher_dashboard/{}", user.id),
        SessionUtils::create_session_cookie(&token, &config),
    ))
}
