use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::errors::DashboardError;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::validate::{
    FieldError, normalize_optional, validate_class_name, validate_enrollment_year,
    validate_student_name, validate_student_number,
};
use crate::utils::{error_response, validation_response};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match normalize_create_request(student) {
        Ok(student) => student,
        Err(e) => return Ok(validation_response(e.message)),
    };

    match storage.create_student(student).await {
        Ok(student) => {
            info!("Student {} ({}) created", student.id, student.name);
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(DashboardError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "A student with this student_number already exists",
            ),
        )),
        Err(e) => Ok(error_response(&e, "Failed to create student")),
    }
}

/// 校验并规范化创建请求，导入时复用
pub(crate) fn normalize_create_request(
    mut student: CreateStudentRequest,
) -> Result<CreateStudentRequest, FieldError> {
    validate_student_name(&student.name).map_err(|m| FieldError::new("name", m))?;
    validate_class_name(&student.class_name).map_err(|m| FieldError::new("class", m))?;

    student.name = student.name.trim().to_string();
    student.class_name = student.class_name.trim().to_string();
    student.discipline = normalize_optional(student.discipline);
    student.student_number = normalize_optional(student.student_number);

    if let Some(ref number) = student.student_number {
        validate_student_number(number).map_err(|m| FieldError::new("student_number", m))?;
    }
    if let Some(year) = student.enrollment_year {
        validate_enrollment_year(year).map_err(|m| FieldError::new("enrollment_year", m))?;
    }

    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, class_name: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            name: name.to_string(),
            class_name: class_name.to_string(),
            discipline: Some("  ".to_string()),
            student_number: None,
            enrollment_year: None,
            admission_date: None,
        }
    }

    #[test]
    fn test_normalize_trims_and_clears_blank_fields() {
        let student = normalize_create_request(request("  Asha ", "10B")).expect("valid");
        assert_eq!(student.name, "Asha");
        assert_eq!(student.discipline, None);
    }

    #[test]
    fn test_normalize_rejects_invalid_input() {
        let err = normalize_create_request(request("", "10B")).unwrap_err();
        assert_eq!(err.field, "name");
        let err = normalize_create_request(request("Asha", "")).unwrap_err();
        assert_eq!(err.field, "class");

        let mut bad_year = request("Asha", "10B");
        bad_year.enrollment_year = Some(1200);
        assert!(normalize_create_request(bad_year).is_err());
    }
}
