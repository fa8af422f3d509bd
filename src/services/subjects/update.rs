use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::errors::DashboardError;
use crate::models::subjects::requests::UpdateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::validate::{validate_required_text, validate_subject_code};
use crate::utils::{error_response, validation_response};

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    mut update: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref code) = update.code {
        if let Err(msg) = validate_subject_code(code) {
            return Ok(validation_response(msg));
        }
        update.code = Some(code.trim().to_ascii_uppercase());
    }
    if let Some(ref name) = update.name {
        if let Err(msg) = validate_required_text("name", name, 100) {
            return Ok(validation_response(msg));
        }
        update.name = Some(name.trim().to_string());
    }

    match storage.update_subject(subject_id, update).await {
        Ok(Some(subject)) => {
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                subject,
                "Subject updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        ))),
        Err(DashboardError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::SubjectAlreadyExists,
                "A subject with this code already exists",
            ),
        )),
        Err(e) => Ok(error_response(&e, "Failed to update subject")),
    }
}
