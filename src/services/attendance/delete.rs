use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::error_response;

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_attendance(event_id).await {
        Ok(true) => {
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Attendance deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AttendanceNotFound,
            "Attendance not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to delete attendance")),
    }
}
