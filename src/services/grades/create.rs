use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::errors::DashboardError;
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::validate::validate_score;
use crate::utils::{error_response, validation_response};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_score(grade.score) {
        return Ok(validation_response(msg));
    }

    // 学生必须在读，科目必须存在
    match storage.get_student_by_id(grade.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to check student")),
    }
    match storage.get_subject_by_id(grade.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "Subject not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to check subject")),
    }

    match storage.create_grade(grade).await {
        Ok(grade) => {
            info!(
                "Grade {} recorded for student {} in {}",
                grade.id, grade.student_id, grade.semester
            );
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade created successfully")))
        }
        Err(DashboardError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::GradeAlreadyExists,
                "A grade for this student, subject and semester already exists",
            ),
        )),
        Err(e) => Ok(error_response(&e, "Failed to create grade")),
    }
}
