use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeMap;

use super::{DashboardService, OVERVIEW_CACHE_KEY, score_cards};
use crate::models::ApiResponse;
use crate::models::dashboard::responses::{
    DisciplineAverage, GradeBucket, OverviewResponse, ScoreCard,
};
use crate::services::{dashboard_cache_key, request_cache};
use crate::utils::error_response;
use crate::utils::grading::{LETTER_GRADES, round2};
use crate::utils::statistics::mean;

// 未填写学科方向的学生归入此组
const UNASSIGNED_DISCIPLINE: &str = "Unassigned";

pub async fn get_overview(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache_key = dashboard_cache_key(OVERVIEW_CACHE_KEY);
    let cache = request_cache(request);
    if let Some(ref cache) = cache
        && let Some(overview) = cache.get_json::<OverviewResponse>(&cache_key).await
    {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            overview,
            "Dashboard overview retrieved successfully",
        )));
    }

    let storage = service.get_storage(request);

    let totals = match storage.dashboard_totals().await {
        Ok(totals) => totals,
        Err(e) => return Ok(error_response(&e, "Failed to count dashboard totals")),
    };
    let aggregates = match storage.student_aggregates().await {
        Ok(aggregates) => aggregates,
        Err(e) => return Ok(error_response(&e, "Failed to aggregate student scores")),
    };
    let cards = score_cards(&aggregates);

    // 平均分按所有成绩记录计算，出勤率按所有考勤事件计算
    let (grade_sum, grade_count) = aggregates
        .iter()
        .fold((0.0, 0), |(sum, count), a| (sum + a.grade_sum, count + a.grade_count));
    let (present, total) = aggregates.iter().fold((0, 0), |(present, total), a| {
        (present + a.attendance_present, total + a.attendance_total)
    });

    let overview = OverviewResponse {
        totals,
        average_score: (grade_count > 0).then(|| round2(grade_sum / grade_count as f64)),
        attendance_rate: (total > 0).then(|| round2(present as f64 / total as f64 * 100.0)),
        grade_distribution: grade_distribution(cards.iter().map(|(_, card)| card)),
        disciplines: discipline_averages(&cards),
    };

    if let Some(cache) = cache {
        cache.insert_json(&cache_key, &overview, 0).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        overview,
        "Dashboard overview retrieved successfully",
    )))
}

/// 按综合成绩等级计数，没有综合成绩的学生不计入
fn grade_distribution<'a>(cards: impl Iterator<Item = &'a ScoreCard>) -> Vec<GradeBucket> {
    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for grade in cards.filter_map(|card| card.overall_grade.as_deref()) {
        *counts.entry(grade).or_default() += 1;
    }
    LETTER_GRADES
        .iter()
        .map(|grade| GradeBucket {
            grade: grade.to_string(),
            count: counts.get(grade).copied().unwrap_or(0),
        })
        .collect()
}

fn discipline_averages(cards: &[(Option<String>, ScoreCard)]) -> Vec<DisciplineAverage> {
    let mut groups: BTreeMap<String, Vec<&ScoreCard>> = BTreeMap::new();
    for (discipline, card) in cards {
        let key = discipline
            .clone()
            .unwrap_or_else(|| UNASSIGNED_DISCIPLINE.to_string());
        groups.entry(key).or_default().push(card);
    }

    groups
        .into_iter()
        .map(|(discipline, cards)| {
            let academic: Vec<f64> = cards.iter().filter_map(|c| c.academic).collect();
            let overall: Vec<f64> = cards.iter().filter_map(|c| c.overall).collect();
            DisciplineAverage {
                discipline,
                students: cards.len() as i64,
                average_score: mean(&academic).map(round2),
                average_overall: mean(&overall).map(round2),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(academic: Option<f64>, overall: Option<f64>, grade: Option<&str>) -> ScoreCard {
        ScoreCard {
            academic,
            cocurricular: 75.0,
            attendance: 80.0,
            overall,
            academic_grade: None,
            overall_grade: grade.map(str::to_string),
        }
    }

    #[test]
    fn test_grade_distribution_covers_all_letters() {
        let cards = [
            card(Some(96.0), Some(95.0), Some("A+")),
            card(Some(96.0), Some(95.0), Some("A+")),
            card(None, None, None),
        ];
        let buckets = grade_distribution(cards.iter());
        assert_eq!(buckets.len(), LETTER_GRADES.len());
        assert_eq!(buckets[0].grade, "A+");
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<i64>(), 2);
    }

    #[test]
    fn test_discipline_averages_skip_missing_scores() {
        let cards = vec![
            (Some("Science".to_string()), card(Some(80.0), Some(79.0), Some("B"))),
            (Some("Science".to_string()), card(None, None, None)),
            (None, card(Some(60.0), Some(65.0), Some("C+"))),
        ];
        let averages = discipline_averages(&cards);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].discipline, "Science");
        assert_eq!(averages[0].students, 2);
        assert_eq!(averages[0].average_score, Some(80.0));
        assert_eq!(averages[1].discipline, UNASSIGNED_DISCIPLINE);
    }
}
