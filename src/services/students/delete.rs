use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::error_response;

/// 默认退学（软删除）；purge 时物理删除，关联记录由外键级联删除
pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    purge: bool,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = if purge {
        storage.purge_student(student_id).await
    } else {
        storage.withdraw_student(student_id).await
    };

    match result {
        Ok(true) => {
            info!(
                "Student {} {}",
                student_id,
                if purge { "purged" } else { "withdrawn" }
            );
            invalidate_dashboard_cache(request).await;
            let message = if purge {
                "Student and related records deleted successfully"
            } else {
                "Student withdrawn successfully"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(message)))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to delete student")),
    }
}
