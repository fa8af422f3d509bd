use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::errors::DashboardError;
use crate::models::attendance::requests::CreateAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::error_response;
use crate::utils::validate::normalize_optional;

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mut event: CreateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(event.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to check student")),
    }

    event.note = normalize_optional(event.note);

    match storage.create_attendance(event).await {
        Ok(event) => {
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                event,
                "Attendance recorded successfully",
            )))
        }
        Err(DashboardError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::AttendanceAlreadyExists,
                "Attendance for this student and date already exists",
            ),
        )),
        Err(e) => Ok(error_response(&e, "Failed to record attendance")),
    }
}
