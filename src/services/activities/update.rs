use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::models::activities::requests::UpdateActivityRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::validate::validate_required_text;
use crate::utils::{error_response, validation_response};

pub async fn update_activity(
    service: &ActivityService,
    request: &HttpRequest,
    activity_id: i64,
    mut update: UpdateActivityRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref name) = update.activity_name {
        if let Err(msg) = validate_required_text("activity_name", name, 200) {
            return Ok(validation_response(msg));
        }
        update.activity_name = Some(name.trim().to_string());
    }

    match storage.update_activity(activity_id, update).await {
        Ok(Some(activity)) => {
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                activity,
                "Activity updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ActivityNotFound,
            "Activity not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to update activity")),
    }
}
