//! 看板聚合服务
//!
//! 聚合结果按查询条件缓存在 ObjectCache 中，任何写操作都会清空缓存。

pub mod overview;
pub mod rankings;
pub mod semesters;
pub mod statistics;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::dashboard::entities::StudentAggregate;
use crate::models::dashboard::requests::{RankingQueryParams, SemesterQueryParams};
use crate::models::dashboard::responses::ScoreCard;
use crate::storage::Storage;
use crate::utils::grading::{GradeWeights, score_card};

pub const OVERVIEW_CACHE_KEY: &str = "dashboard:overview";
pub const STATISTICS_CACHE_KEY: &str = "dashboard:statistics";

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn get_overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        overview::get_overview(self, request).await
    }

    pub async fn get_semester_trend(
        &self,
        request: &HttpRequest,
        params: SemesterQueryParams,
    ) -> ActixResult<HttpResponse> {
        semesters::get_semester_trend(self, request, params).await
    }

    pub async fn get_statistics(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        statistics::get_statistics(self, request).await
    }

    pub async fn get_rankings(
        &self,
        request: &HttpRequest,
        params: RankingQueryParams,
    ) -> ActixResult<HttpResponse> {
        rankings::get_rankings(self, request, params).await
    }
}

/// 计算所有在读学生的评分卡，附带学科方向
pub(crate) fn score_cards(aggregates: &[StudentAggregate]) -> Vec<(Option<String>, ScoreCard)> {
    let weights = GradeWeights::from_config(&AppConfig::get().grading);
    aggregates
        .iter()
        .map(|aggregate| (aggregate.discipline.clone(), score_card(aggregate, &weights)))
        .collect()
}
