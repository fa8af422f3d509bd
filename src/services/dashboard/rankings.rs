use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::cmp::Ordering;

use super::DashboardService;
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::dashboard::entities::StudentAggregate;
use crate::models::dashboard::requests::{RankingMetric, RankingQueryParams};
use crate::models::dashboard::responses::{
    GapSummary, PerformanceGap, RankedStudent, RankingsResponse, ScoreCard,
};
use crate::services::{dashboard_cache_key, request_cache};
use crate::utils::error_response;
use crate::utils::grading::{GradeWeights, round2, score_card};
use crate::utils::statistics::{mean, quantile};

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 50;
/// 超过该分差视为明显偏科
pub const SIGNIFICANT_GAP: f64 = 20.0;

const GAP_PAIRS: [&str; 3] = [
    "academic-cocurricular",
    "academic-attendance",
    "cocurricular-attendance",
];

pub async fn get_rankings(
    service: &DashboardService,
    request: &HttpRequest,
    params: RankingQueryParams,
) -> ActixResult<HttpResponse> {
    let cache_key = dashboard_cache_key(&params.cache_key());
    let cache = request_cache(request);
    if let Some(ref cache) = cache
        && let Some(rankings) = cache.get_json::<RankingsResponse>(&cache_key).await
    {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            rankings,
            "Rankings retrieved successfully",
        )));
    }

    let storage = service.get_storage(request);
    let aggregates = match storage.student_aggregates().await {
        Ok(aggregates) => aggregates,
        Err(e) => return Ok(error_response(&e, "Failed to aggregate student scores")),
    };

    let discipline = params
        .discipline
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    let weights = GradeWeights::from_config(&AppConfig::get().grading);
    let scored: Vec<(&StudentAggregate, ScoreCard)> = aggregates
        .iter()
        .filter(|a| discipline.is_none() || a.discipline.as_deref() == discipline)
        .map(|a| (a, score_card(a, &weights)))
        .collect();

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let rankings = build_rankings(&scored, params.sort_by, limit);

    if let Some(cache) = cache {
        cache.insert_json(&cache_key, &rankings, 0).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        rankings,
        "Rankings retrieved successfully",
    )))
}

fn metric_value(card: &ScoreCard, metric: RankingMetric) -> Option<f64> {
    match metric {
        RankingMetric::Overall => card.overall,
        RankingMetric::Academic => card.academic,
        RankingMetric::Cocurricular => Some(card.cocurricular),
        RankingMetric::Attendance => Some(card.attendance),
    }
}

/// 三项分数两两之差的最大值；并列时取 GAP_PAIRS 中靠前的一对
fn performance_gap(aggregate: &StudentAggregate, card: &ScoreCard) -> Option<PerformanceGap> {
    let academic = card.academic?;
    let diffs = pair_gaps(academic, card.cocurricular, card.attendance);
    let (widest, max_gap) = diffs
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |best, (i, gap)| if *gap > best.1 { (i, *gap) } else { best });

    Some(PerformanceGap {
        student_id: aggregate.student_id,
        name: aggregate.name.clone(),
        academic,
        cocurricular: card.cocurricular,
        attendance: card.attendance,
        max_gap: round2(max_gap),
        widest_pair: GAP_PAIRS[widest].to_string(),
    })
}

fn pair_gaps(academic: f64, cocurricular: f64, attendance: f64) -> [f64; 3] {
    [
        (academic - cocurricular).abs(),
        (academic - attendance).abs(),
        (cocurricular - attendance).abs(),
    ]
}

fn gap_summary(gaps: &[PerformanceGap]) -> Option<GapSummary> {
    let values: Vec<f64> = gaps.iter().map(|g| g.max_gap).collect();
    let average = mean(&values)?;
    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);
    let n = gaps.len() as f64;

    // 与最大差距相等的每一对都计数
    let mut pair_counts = [0usize; 3];
    for gap in gaps {
        let diffs = pair_gaps(gap.academic, gap.cocurricular, gap.attendance);
        for (i, diff) in diffs.iter().enumerate() {
            if round2(*diff) == gap.max_gap {
                pair_counts[i] += 1;
            }
        }
    }
    let (common, common_count) = pair_counts
        .iter()
        .enumerate()
        .fold((0, 0), |best, (i, count)| if *count > best.1 { (i, *count) } else { best });

    let significant = values.iter().filter(|g| **g > SIGNIFICANT_GAP).count();

    Some(GapSummary {
        average_gap: round2(average),
        median_gap: round2(quantile(&sorted, 0.5)?),
        largest_gap: sorted.last().copied()?,
        significant_gap_percent: round2(significant as f64 / n * 100.0),
        most_common_pair: GAP_PAIRS[common].to_string(),
        most_common_pair_percent: round2(common_count as f64 / n * 100.0),
    })
}

fn ranked_entry(idx: usize, row: &(&StudentAggregate, &ScoreCard, f64)) -> RankedStudent {
    let (aggregate, card, score) = *row;
    RankedStudent {
        rank: idx + 1,
        student_id: aggregate.student_id,
        name: aggregate.name.clone(),
        discipline: aggregate.discipline.clone(),
        score,
        score_card: card.clone(),
    }
}

/// 只有存在学业成绩的学生参与排名与差距分析
pub(crate) fn build_rankings(
    scored: &[(&StudentAggregate, ScoreCard)],
    sort_by: RankingMetric,
    limit: usize,
) -> RankingsResponse {
    let mut ranked: Vec<(&StudentAggregate, &ScoreCard, f64)> = scored
        .iter()
        .filter(|(_, card)| card.overall.is_some())
        .filter_map(|(a, card)| metric_value(card, sort_by).map(|v| (*a, card, v)))
        .collect();
    // 分数降序，同分按学生 ID 升序
    ranked.sort_by(|x, y| match y.2.total_cmp(&x.2) {
        Ordering::Equal => x.0.student_id.cmp(&y.0.student_id),
        other => other,
    });

    let top: Vec<RankedStudent> = ranked
        .iter()
        .enumerate()
        .take(limit)
        .map(|(idx, row)| ranked_entry(idx, row))
        .collect();
    let bottom: Vec<RankedStudent> = ranked
        .iter()
        .enumerate()
        .rev()
        .take(limit)
        .map(|(idx, row)| ranked_entry(idx, row))
        .collect();

    let mut gaps: Vec<PerformanceGap> = ranked
        .iter()
        .filter_map(|(a, card, _)| performance_gap(a, card))
        .collect();
    let gap_summary = gap_summary(&gaps);

    gaps.sort_by(|x, y| match y.max_gap.total_cmp(&x.max_gap) {
        Ordering::Equal => x.student_id.cmp(&y.student_id),
        other => other,
    });
    let largest_gaps: Vec<PerformanceGap> = gaps.iter().take(limit).cloned().collect();
    let most_balanced: Vec<PerformanceGap> = gaps.iter().rev().take(limit).cloned().collect();

    RankingsResponse {
        sort_by,
        ranked_students: ranked.len(),
        top,
        bottom,
        largest_gaps,
        most_balanced,
        gap_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64, name: &str) -> StudentAggregate {
        StudentAggregate {
            student_id: id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn card(academic: Option<f64>, cocurricular: f64, attendance: f64) -> ScoreCard {
        ScoreCard {
            academic,
            cocurricular,
            attendance,
            overall: academic.map(|a| round2(a * 0.6 + cocurricular * 0.2 + attendance * 0.2)),
            academic_grade: None,
            overall_grade: None,
        }
    }

    #[test]
    fn test_top_and_bottom_follow_overall_score() {
        let students = [
            student(1, "Asha"),
            student(2, "Ravi"),
            student(3, "Meera"),
            student(4, "Kiran"),
        ];
        let scored = vec![
            (&students[0], card(Some(90.0), 75.0, 80.0)),
            (&students[1], card(Some(60.0), 75.0, 80.0)),
            (&students[2], card(Some(75.0), 75.0, 80.0)),
            // 没有成绩的学生不参与排名
            (&students[3], card(None, 95.0, 100.0)),
        ];

        let rankings = build_rankings(&scored, RankingMetric::Overall, 2);
        assert_eq!(rankings.ranked_students, 3);
        let top: Vec<(&str, usize)> = rankings
            .top
            .iter()
            .map(|r| (r.name.as_str(), r.rank))
            .collect();
        assert_eq!(top, vec![("Asha", 1), ("Meera", 2)]);
        let bottom: Vec<(&str, usize)> = rankings
            .bottom
            .iter()
            .map(|r| (r.name.as_str(), r.rank))
            .collect();
        assert_eq!(bottom, vec![("Ravi", 3), ("Meera", 2)]);
    }

    #[test]
    fn test_ranking_by_component_metric() {
        let students = [student(1, "Asha"), student(2, "Ravi")];
        let scored = vec![
            (&students[0], card(Some(90.0), 75.0, 60.0)),
            (&students[1], card(Some(60.0), 75.0, 100.0)),
        ];
        let rankings = build_rankings(&scored, RankingMetric::Attendance, 5);
        assert_eq!(rankings.top[0].name, "Ravi");
        assert_eq!(rankings.top[0].score, 100.0);
    }

    #[test]
    fn test_gap_analysis() {
        let students = [student(1, "Asha"), student(2, "Ravi"), student(3, "Meera")];
        let scored = vec![
            // 差距：15、10、5
            (&students[0], card(Some(90.0), 75.0, 80.0)),
            // 差距：35、40、5 -> academic-attendance
            (&students[1], card(Some(40.0), 75.0, 80.0)),
            // 差距：0、5、5
            (&students[2], card(Some(75.0), 75.0, 80.0)),
        ];
        let rankings = build_rankings(&scored, RankingMetric::Overall, 5);

        assert_eq!(rankings.largest_gaps[0].name, "Ravi");
        assert_eq!(rankings.largest_gaps[0].max_gap, 40.0);
        assert_eq!(rankings.largest_gaps[0].widest_pair, "academic-attendance");
        assert_eq!(rankings.most_balanced[0].name, "Meera");
        assert_eq!(rankings.most_balanced[0].max_gap, 5.0);

        let summary = rankings.gap_summary.expect("summary");
        assert_eq!(summary.largest_gap, 40.0);
        assert_eq!(summary.median_gap, 15.0);
        assert_eq!(summary.average_gap, 20.0);
        assert_eq!(summary.significant_gap_percent, 33.33);
        // Meera 的最大差距同时出现在两对上
        assert_eq!(summary.most_common_pair, "academic-attendance");
        assert_eq!(summary.most_common_pair_percent, 66.67);
    }

    #[test]
    fn test_rankings_without_grades_are_empty() {
        let students = [student(1, "Asha")];
        let scored = vec![(&students[0], card(None, 75.0, 80.0))];
        let rankings = build_rankings(&scored, RankingMetric::Overall, 5);
        assert_eq!(rankings.ranked_students, 0);
        assert!(rankings.top.is_empty());
        assert!(rankings.gap_summary.is_none());
    }
}
