use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::{OesError, Result};
use crate::models::students::responses::StudentDashboardResponse;
use crate::views::{View, error_page, render, templates};

pub async fn dashboard(
    service: &StudentService,
    request: &HttpRequest,
    class_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    match build_dashboard(service, request, class_id, student_id).await {
        Ok(view) => Ok(render(request, view)),
        Err(e) => Ok(error_page(request, &e)),
    }
}

async fn build_dashboard(
    service: &StudentService,
    request: &HttpRequest,
    class_id: i64,
    student_id: i64,
) -> Result<View> {
    let storage = service.get_storage(request);

    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| OesError::not_found(format!("Class {class_id} not found")))?;
    let student = storage
        .get_student_by_id(student_id)
        .await?
        .filter(|s| s.class_id == class.id)
        .ok_or_else(|| OesError::not_found(format!("Student {student_id} not found")))?;
    let modules = storage.list_modules_by_class(class.id).await?;

    View::new(templates::STUDENT_DASHBOARD).with_context(&StudentDashboardResponse {
        class,
        student,
        modules,
    })
}
