use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::models::activities::requests::CreateActivityRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::validate::{FieldError, normalize_optional, validate_required_text};
use crate::utils::{error_response, validation_response};

pub async fn create_activity(
    service: &ActivityService,
    request: &HttpRequest,
    activity: CreateActivityRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let activity = match normalize_create_request(activity) {
        Ok(activity) => activity,
        Err(e) => return Ok(validation_response(e.message)),
    };

    match storage.get_student_by_id(activity.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to check student")),
    }

    match storage.create_activity(activity).await {
        Ok(activity) => {
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                activity,
                "Activity recorded successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, "Failed to record activity")),
    }
}

/// 活动类别统一存为大写，便于按类别计分
pub(crate) fn normalize_create_request(
    mut activity: CreateActivityRequest,
) -> Result<CreateActivityRequest, FieldError> {
    validate_required_text("activity_name", &activity.activity_name, 200)
        .map_err(|m| FieldError::new("activity_name", m))?;

    activity.activity_name = activity.activity_name.trim().to_string();
    activity.category = normalize_optional(activity.category).map(|c| c.to_ascii_uppercase());
    activity.achievement = normalize_optional(activity.achievement);
    Ok(activity)
}
