use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::models::ApiResponse;
use crate::models::dashboard::requests::SemesterQueryParams;
use crate::models::dashboard::responses::SemesterTrendResponse;
use crate::services::{dashboard_cache_key, request_cache};
use crate::utils::error_response;

/// 学期趋势，按 S1..S8 排序
pub async fn get_semester_trend(
    service: &DashboardService,
    request: &HttpRequest,
    params: SemesterQueryParams,
) -> ActixResult<HttpResponse> {
    let cache_key = dashboard_cache_key(&params.cache_key());
    let cache = request_cache(request);
    if let Some(ref cache) = cache
        && let Some(trend) = cache.get_json::<SemesterTrendResponse>(&cache_key).await
    {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            trend,
            "Semester trend retrieved successfully",
        )));
    }

    let storage = service.get_storage(request);

    let trend = match storage.semester_breakdown(params).await {
        Ok(items) => SemesterTrendResponse { items },
        Err(e) => return Ok(error_response(&e, "Failed to aggregate semester trend")),
    };

    if let Some(cache) = cache {
        cache.insert_json(&cache_key, &trend, 0).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        trend,
        "Semester trend retrieved successfully",
    )))
}
