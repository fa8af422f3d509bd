use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::errors::DashboardError;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::invalidate_dashboard_cache;
use crate::utils::validate::{
    FieldError, normalize_optional, validate_required_text, validate_subject_code,
};
use crate::utils::{error_response, validation_response};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let subject = match normalize_create_request(subject) {
        Ok(subject) => subject,
        Err(e) => return Ok(validation_response(e.message)),
    };

    match storage.create_subject(subject).await {
        Ok(subject) => {
            info!("Subject {} ({}) created", subject.id, subject.code);
            invalidate_dashboard_cache(request).await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(DashboardError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::SubjectAlreadyExists,
                "A subject with this code already exists",
            ),
        )),
        Err(e) => Ok(error_response(&e, "Failed to create subject")),
    }
}

/// 科目代码统一为大写
pub(crate) fn normalize_create_request(
    mut subject: CreateSubjectRequest,
) -> Result<CreateSubjectRequest, FieldError> {
    validate_subject_code(&subject.code).map_err(|m| FieldError::new("code", m))?;
    validate_required_text("name", &subject.name, 100).map_err(|m| FieldError::new("name", m))?;

    subject.code = subject.code.trim().to_ascii_uppercase();
    subject.name = subject.name.trim().to_string();
    subject.discipline = normalize_optional(subject.discipline);
    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_uppercased() {
        let subject = normalize_create_request(CreateSubjectRequest {
            code: " math101 ".to_string(),
            name: "Mathematics".to_string(),
            discipline: None,
        })
        .expect("valid");
        assert_eq!(subject.code, "MATH101");
    }

    #[test]
    fn test_invalid_code_rejected() {
        let result = normalize_create_request(CreateSubjectRequest {
            code: "MATH 101!".to_string(),
            name: "Mathematics".to_string(),
            discipline: None,
        });
        assert!(result.is_err());
    }
}
