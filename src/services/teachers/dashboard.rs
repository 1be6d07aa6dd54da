use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::{OesError, Result};
use crate::models::users::responses::TeacherDashboardResponse;
use crate::views::{View, error_page, render, templates};

pub async fn dashboard(
    service: &TeacherService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    match build_dashboard(service, request, user_id).await {
        Ok(view) => Ok(render(request, view)),
        Err(e) => Ok(error_page(request, &e)),
    }
}

async fn build_dashboard(
    service: &TeacherService,
    request: &HttpRequest,
    user_id: i64,
) -> Result<View> {
    let storage = service.get_storage(request);

    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| OesError::not_found(format!("User {user_id} not found")))?;
    let classes = storage.list_classes_by_teacher(user.id).await?;

    View::new(templates::TEACHER_DASHBOARD)
        .with_context(&TeacherDashboardResponse { user, classes })
}
