use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::ApiResponse;
use crate::models::attendance::requests::{AttendanceListQuery, AttendanceQueryParams};
use crate::utils::{error_response, validation_response};

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Ok(validation_response("from must not be later than to"));
    }

    match storage
        .list_attendance_with_pagination(AttendanceListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve attendance list")),
    }
}
