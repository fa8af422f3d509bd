use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::models::ApiResponse;
use crate::models::activities::requests::{ActivityListQuery, ActivityQueryParams};
use crate::utils::{error_response, validation_response};

pub async fn list_activities(
    service: &ActivityService,
    request: &HttpRequest,
    query: ActivityQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Ok(validation_response("from must not be later than to"));
    }

    match storage
        .list_activities_with_pagination(ActivityListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Activity list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to retrieve activity list")),
    }
}
