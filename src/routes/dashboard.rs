use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::models::dashboard::requests::{RankingQueryParams, SemesterQueryParams};
use crate::services::DashboardService;

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn get_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.get_overview(&req).await
}

pub async fn get_semester_trend(
    req: HttpRequest,
    query: web::Query<SemesterQueryParams>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE
        .get_semester_trend(&req, query.into_inner())
        .await
}

pub async fn get_statistics(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.get_statistics(&req).await
}

pub async fn get_rankings(
    req: HttpRequest,
    query: web::Query<RankingQueryParams>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.get_rankings(&req, query.into_inner()).await
}

pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middleware::Compress::default())
            .route("/overview", web::get().to(get_overview))
            .route("/semesters", web::get().to(get_semester_trend))
            .route("/statistics", web::get().to(get_statistics))
            .route("/rankings", web::get().to(get_rankings)),
    );
}
