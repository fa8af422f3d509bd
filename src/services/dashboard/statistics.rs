use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DashboardService, STATISTICS_CACHE_KEY, score_cards};
use crate::models::ApiResponse;
use crate::models::dashboard::responses::{ComponentCorrelation, ScoreCard, StatisticsResponse};
use crate::services::{dashboard_cache_key, request_cache};
use crate::utils::error_response;
use crate::utils::statistics::{describe, pearson};

pub async fn get_statistics(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache_key = dashboard_cache_key(STATISTICS_CACHE_KEY);
    let cache = request_cache(request);
    if let Some(ref cache) = cache
        && let Some(stats) = cache
            .get_json::<StatisticsResponse>(&cache_key)
            .await
    {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Statistics retrieved successfully",
        )));
    }

    let storage = service.get_storage(request);

    let aggregates = match storage.student_aggregates().await {
        Ok(aggregates) => aggregates,
        Err(e) => return Ok(error_response(&e, "Failed to aggregate student scores")),
    };
    let cards: Vec<ScoreCard> = score_cards(&aggregates)
        .into_iter()
        .map(|(_, card)| card)
        .collect();
    let stats = build_statistics(&cards);

    if let Some(cache) = cache {
        cache.insert_json(&cache_key, &stats, 0).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stats,
        "Statistics retrieved successfully",
    )))
}

fn round4(value: f64) -> f64 {
    (value * 10000.0).round() / 10000.0
}

fn build_statistics(cards: &[ScoreCard]) -> StatisticsResponse {
    let academic: Vec<f64> = cards.iter().filter_map(|c| c.academic).collect();
    let cocurricular: Vec<f64> = cards.iter().map(|c| c.cocurricular).collect();
    let attendance: Vec<f64> = cards.iter().map(|c| c.attendance).collect();
    let overall: Vec<f64> = cards.iter().filter_map(|c| c.overall).collect();

    // 相关系数只在有综合成绩的学生上计算
    let ranked: Vec<&ScoreCard> = cards.iter().filter(|c| c.overall.is_some()).collect();
    let overall_of = |c: &&ScoreCard| c.overall.unwrap_or_default();
    let ranked_overall: Vec<f64> = ranked.iter().map(overall_of).collect();
    let component = |name: &str, values: Vec<f64>| ComponentCorrelation {
        component: name.to_string(),
        coefficient: pearson(&values, &ranked_overall).map(round4),
    };

    let correlations = vec![
        component(
            "academic",
            ranked.iter().map(|c| c.academic.unwrap_or_default()).collect(),
        ),
        component("cocurricular", ranked.iter().map(|c| c.cocurricular).collect()),
        component("attendance", ranked.iter().map(|c| c.attendance).collect()),
    ];

    StatisticsResponse {
        student_count: cards.len() as i64,
        academic: describe(&academic),
        cocurricular: describe(&cocurricular),
        attendance: describe(&attendance),
        overall: describe(&overall),
        correlations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(academic: Option<f64>, cocurricular: f64, attendance: f64) -> ScoreCard {
        let overall = academic.map(|a| a * 0.6 + cocurricular * 0.2 + attendance * 0.2);
        ScoreCard {
            academic,
            cocurricular,
            attendance,
            overall,
            academic_grade: None,
            overall_grade: None,
        }
    }

    #[test]
    fn test_statistics_exclude_students_without_grades() {
        let cards = vec![
            card(Some(60.0), 75.0, 80.0),
            card(Some(90.0), 75.0, 80.0),
            card(None, 90.0, 100.0),
        ];
        let stats = build_statistics(&cards);
        assert_eq!(stats.student_count, 3);
        assert_eq!(stats.academic.as_ref().map(|s| s.count), Some(2));
        assert_eq!(stats.cocurricular.as_ref().map(|s| s.count), Some(3));
        assert_eq!(stats.overall.as_ref().map(|s| s.count), Some(2));

        // 只有学业成绩变化时与综合成绩完全正相关
        assert_eq!(stats.correlations[0].component, "academic");
        assert_eq!(stats.correlations[0].coefficient, Some(1.0));
        // 分项为常数时没有相关系数
        assert_eq!(stats.correlations[1].coefficient, None);
    }

    #[test]
    fn test_statistics_on_empty_population() {
        let stats = build_statistics(&[]);
        assert_eq!(stats.student_count, 0);
        assert!(stats.academic.is_none());
        assert!(stats.overall.is_none());
        assert!(stats.correlations.iter().all(|c| c.coefficient.is_none()));
    }
}
