use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::ApiResponse;
use crate::models::grades::requests::{GradeListQuery, GradeQueryParams};
use crate::utils::{error_response, validation_response};

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let (Some(min), Some(max)) = (query.min_score, query.max_score)
        && min > max
    {
        return Ok(validation_response(
            "min_score must not be greater than max_score",
        ));
    }

    match storage
        .list_grades_with_pagination(GradeListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grade list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve grade list")),
    }
}
