use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::requests::{SubjectListQuery, SubjectQueryParams};
use crate::utils::error_response;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    query: SubjectQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_subjects_with_pagination(SubjectListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve subject list")),
    }
}
