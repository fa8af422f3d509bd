use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::UpdateAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::error_response;

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    event_id: i64,
    update: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_attendance(event_id, update).await {
        Ok(Some(event)) => {
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                event,
                "Attendance updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AttendanceNotFound,
            "Attendance not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to update attendance")),
    }
}
