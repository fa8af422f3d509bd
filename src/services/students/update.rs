use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::DashboardError;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::validate::{
    validate_class_name, validate_enrollment_year, validate_student_name, validate_student_number,
};
use crate::utils::{error_response, validation_response};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let update = match normalize_update_request(update) {
        Ok(update) => update,
        Err(msg) => return Ok(validation_response(msg)),
    };

    match storage.update_student(student_id, update).await {
        Ok(Some(student)) => {
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(DashboardError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "A student with this student_number already exists",
            ),
        )),
        Err(e) => Ok(error_response(&e, "Failed to update student")),
    }
}

fn normalize_update_request(
    mut update: UpdateStudentRequest,
) -> Result<UpdateStudentRequest, String> {
    if let Some(ref name) = update.name {
        validate_student_name(name)?;
        update.name = Some(name.trim().to_string());
    }
    if let Some(ref class_name) = update.class_name {
        validate_class_name(class_name)?;
        update.class_name = Some(class_name.trim().to_string());
    }
    // 空字符串表示清空学号，由存储层处理
    if let Some(ref number) = update.student_number
        && !number.trim().is_empty()
    {
        validate_student_number(number)?;
    }
    if let Some(year) = update.enrollment_year {
        validate_enrollment_year(year)?;
    }
    Ok(update)
}
