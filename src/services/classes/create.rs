use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::ClassService;
use super::import::{ImportErrorKind, import_roster};
use crate::errors::{OesError, Result};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::classes::responses::CreateClassFormResponse;
use crate::utils::read_multipart;
use crate::views::{View, error_page, redirect, redirect_with_flash, render, templates};

pub const MISSING_FIELDS_MESSAGE: &str = "Class name and subject are required.";
pub const DUPLICATE_CLASS_MESSAGE: &str = "A class with this name already exists.";

fn form_view(user_id: i64) -> Result<View> {
    View::new(templates::CREATE_CLASS).with_context(&CreateClassFormResponse { user_id })
}

pub async fn create_class_form(
    service: &ClassService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let view = match storage.get_user_by_id(user_id).await {
        Ok(Some(_)) => form_view(user_id),
        Ok(None) => Err(OesError::not_found(format!("User {user_id} not found"))),
        Err(e) => Err(e),
    };

    match view {
        Ok(view) => Ok(render(request, view)),
        Err(e) => Ok(error_page(request, &e)),
    }
}

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    user_id: i64,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut form = match read_multipart(&mut payload).await {
        Ok(form) => form,
        Err(e) => return Ok(error_page(request, &e)),
    };

    let name = form.field("name").unwrap_or_default().to_string();
    let subject = form.field("subject").unwrap_or_default().to_string();

    // 重新渲染表单并附带提示
    let rerender = |message: &str| match form_view(user_id) {
        Ok(view) => render(request, view.flash(message)),
        Err(e) => error_page(request, &e),
    };

    if name.is_empty() || subject.is_empty() {
        return Ok(rerender(MISSING_FIELDS_MESSAGE));
    }

    match storage.get_user_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(error_page(
                request,
                &OesError::not_found(format!("User {user_id} not found")),
            ));
        }
        Err(e) => return Ok(error_page(request, &e)),
    }

    let class = match storage
        .create_class(CreateClassRequest {
            name,
            subject,
            teacher_id: user_id,
        })
        .await
    {
        Ok(class) => class,
        Err(OesError::UniqueViolation(msg)) => {
            info!("Duplicate class name rejected: {}", msg);
            return Ok(rerender(DUPLICATE_CLASS_MESSAGE));
        }
        Err(e) => return Ok(error_page(request, &e)),
    };
    info!("Class {} (ID: {}) created by {}", class.name, class.id, user_id);

    let dashboard = format!("/teacher_dashboard/{user_id}");

    let Some(roster) = form.take_file("csv_file") else {
        return Ok(redirect(&dashboard));
    };

    // 保留原始名单文件
    if let Err(e) = service
        .get_blobs(request)
        .save(&roster.file_name, &roster.content)
        .await
    {
        return Ok(error_page(request, &e));
    }

    match import_roster(storage.as_ref(), class.id, &roster.file_name, &roster.content).await {
        Ok(summary) => {
            info!(
                "Imported {} student(s) into class {}",
                summary.imported, class.id
            );
            Ok(redirect(&dashboard))
        }
        Err(err) if err.kind == ImportErrorKind::Store => {
            error!("Roster import for class {} failed: {}", class.id, err);
            Ok(error_page(request, &OesError::database_operation(err.detail)))
        }
        Err(err) => {
            warn!("Roster import for class {} stopped: {}", class.id, err);
            Ok(redirect_with_flash(request, &dashboard, err.flash_message()))
        }
    }
}
