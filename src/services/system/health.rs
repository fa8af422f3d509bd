use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::error;

use super::SystemService;
use crate::models::system::responses::HealthResponse;
use crate::models::{AppStartTime, ApiResponse, ErrorCode};

/// 检查数据库连通性并返回运行信息
pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let storage = service.get_storage(request);

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds())
        .unwrap_or_default();

    let database_ok = match storage.ping().await {
        Ok(()) => true,
        Err(e) => {
            error!("Health check database ping failed: {}", e);
            false
        }
    };

    let response = HealthResponse {
        status: if database_ok { "ok" } else { "degraded" }.to_string(),
        database: if database_ok { "up" } else { "down" }.to_string(),
        cache_type: config.cache.cache_type.clone(),
        environment: config.app.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
    };

    if database_ok {
        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
            ErrorCode::InternalServerError,
            response,
            "Database is unreachable",
        )))
    }
}
