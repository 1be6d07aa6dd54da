use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::ModuleService;
use crate::errors::{OesError, Result};
use crate::middlewares::RequireSession;
use crate::models::modules::entities::Module;
use crate::utils::{SessionIdentity, get_config};
use crate::views::error_page;

pub async fn download_pdf(
    service: &ModuleService,
    request: &HttpRequest,
    module_id: i64,
) -> ActixResult<HttpResponse> {
    match load_pdf(service, request, module_id).await {
        Ok((module, file_name, content)) => {
            tracing::debug!("Serving PDF of module {}", module.id);
            Ok(HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, "application/pdf"))
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
                ))
                .body(content))
        }
        Err(e) => Ok(error_page(request, &e)),
    }
}

async fn load_pdf(
    service: &ModuleService,
    request: &HttpRequest,
    module_id: i64,
) -> Result<(Module, String, Vec<u8>)> {
    let storage = service.get_storage(request);

    let module = storage
        .get_module_by_id(module_id)
        .await?
        .ok_or_else(|| OesError::not_found(format!("Module {module_id} not found")))?;

    // 教师只能下载自己班级的附件，学生只能下载本班的附件
    let identity = RequireSession::extract_identity(request);
    let allowed = match identity {
        Some(SessionIdentity::Student { class_id, .. }) => class_id == module.class_id,
        Some(SessionIdentity::Teacher { user_id }) => storage
            .get_class_by_id(module.class_id)
            .await?
            .is_some_and(|class| class.teacher_id == user_id),
        None => !get_config(request).session.enforce,
    };
    if !allowed {
        return Err(OesError::authorization(
            "You are not allowed to access this file.",
        ));
    }

    let (Some(file_name), Some(key)) = (module.pdf_file.clone(), module.pdf_blob_key.clone())
    else {
        return Err(OesError::not_found(format!(
            "Module {module_id} has no PDF attached"
        )));
    };

    let content = service.get_blobs(request).read(&key).await?;
    Ok((module, file_name, content))
}
