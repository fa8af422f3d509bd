use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::error_response;

pub async fn delete_activity(
    service: &ActivityService,
    request: &HttpRequest,
    activity_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_activity(activity_id).await {
        Ok(true) => {
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Activity deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ActivityNotFound,
            "Activity not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to delete activity")),
    }
}
