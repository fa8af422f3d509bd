use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::students::requests::{StudentListQuery, StudentQueryParams};
use crate::utils::{error_response, validation_response};

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let (Some(from), Some(to)) = (query.enrollment_year_from, query.enrollment_year_to)
        && from > to
    {
        return Ok(validation_response(
            "enrollment_year_from must not be greater than enrollment_year_to",
        ));
    }

    match storage
        .list_students_with_pagination(StudentListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve student list")),
    }
}
