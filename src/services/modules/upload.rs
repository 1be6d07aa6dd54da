use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ModuleService;
use super::notes::{ModuleUpload, NotesError, apply_upload};
use crate::errors::{OesError, Result};
use crate::models::modules::requests::CreateModuleRequest;
use crate::models::modules::responses::UploadNotesFormResponse;
use crate::utils::{get_config, read_multipart};
use crate::views::{View, error_page, redirect, redirect_with_flash, render, templates};

pub const MISSING_NAME_MESSAGE: &str = "Module name is required.";

async fn form_view(
    service: &ModuleService,
    request: &HttpRequest,
    class_id: i64,
    user_id: i64,
) -> Result<View> {
    let storage = service.get_storage(request);

    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| OesError::not_found(format!("Class {class_id} not found")))?;
    let modules = storage.list_modules_by_class(class.id).await?;

    View::new(templates::UPLOAD_NOTES).with_context(&UploadNotesFormResponse {
        class,
        modules,
        user_id,
        max_pdf_size: get_config(request).upload.max_pdf_size,
    })
}

pub async fn upload_form(
    service: &ModuleService,
    request: &HttpRequest,
    class_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    match form_view(service, request, class_id, user_id).await {
        Ok(view) => Ok(render(request, view)),
        Err(e) => Ok(error_page(request, &e)),
    }
}

pub async fn upload_notes(
    service: &ModuleService,
    request: &HttpRequest,
    class_id: i64,
    user_id: i64,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = get_config(request);

    // 先读完整个表单，处理顺序与字段顺序无关
    let mut form = match read_multipart(&mut payload).await {
        Ok(form) => form,
        Err(e) => return Ok(error_page(request, &e)),
    };

    let name = form.field("name").unwrap_or_default().to_string();
    if name.is_empty() {
        return Ok(match form_view(service, request, class_id, user_id).await {
            Ok(view) => render(request, view.flash(MISSING_NAME_MESSAGE)),
            Err(e) => error_page(request, &e),
        });
    }

    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(error_page(
                request,
                &OesError::not_found(format!("Class {class_id} not found")),
            ));
        }
        Err(e) => return Ok(error_page(request, &e)),
    }

    let module = match storage
        .create_module(CreateModuleRequest { name, class_id })
        .await
    {
        Ok(module) => module,
        Err(e) => return Ok(error_page(request, &e)),
    };
    info!("Module {} (ID: {}) created in class {}", module.name, module.id, class_id);

    let upload = ModuleUpload::from_form(&mut form);
    let blobs = service.get_blobs(request);

    match apply_upload(
        storage.as_ref(),
        blobs.as_ref(),
        module.id,
        upload,
        config.upload.max_pdf_size,
    )
    .await
    {
        Ok(summary) => {
            info!(
                "Module {} received {} note fragment(s) and {} PDF(s)",
                module.id, summary.fragments, summary.pdfs
            );
            Ok(redirect(&format!("/teacher_dashboard/{user_id}")))
        }
        Err(NotesError::Store(e)) => Ok(error_page(request, &e)),
        Err(err) => {
            warn!("Upload for module {} stopped: {}", module.id, err);
            let message = err.flash_message().unwrap_or_else(|| err.to_string());
            Ok(redirect_with_flash(
                request,
                &format!("/upload_notes/{class_id}/{user_id}"),
                message,
            ))
        }
    }
}
