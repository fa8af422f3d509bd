use actix_web::HttpResponse;
use tracing::error;

use crate::errors::DashboardError;
use crate::models::{ApiResponse, ErrorCode};

/// 将存储层错误映射为 HTTP 响应
///
/// 校验类错误为 400，不存在为 404，唯一冲突为 409，其余为 500 并记录日志。
pub fn error_response(err: &DashboardError, context: &str) -> HttpResponse {
    match err {
        DashboardError::Validation(msg)
        | DashboardError::DateParse(msg)
        | DashboardError::Import(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ValidationFailed, format!("{context}: {msg}")),
        ),
        DashboardError::NotFound(msg) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("{context}: {msg}"),
        )),
        DashboardError::Conflict(msg) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            format!("{context}: {msg}"),
        )),
        _ => {
            error!("{}: {}", context, err);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: internal server error"),
            ))
        }
    }
}

/// 参数校验失败
pub fn validation_response(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DashboardError::validation("bad"), StatusCode::BAD_REQUEST),
            (DashboardError::not_found("gone"), StatusCode::NOT_FOUND),
            (DashboardError::conflict("dup"), StatusCode::CONFLICT),
            (
                DashboardError::database_operation("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DashboardError::cache_connection("down"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(&err, "test").status(), status);
        }
    }
}
