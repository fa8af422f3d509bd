use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::config::AppConfig;
use crate::models::activities::requests::ActivityListQuery;
use crate::models::dashboard::requests::SemesterQueryParams;
use crate::models::students::responses::{AttendanceSummary, StudentProfileResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::error_response;
use crate::utils::grading::{GradeWeights, round2, score_card};
use crate::utils::statistics::percentile_rank;

pub async fn get_student_profile(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "Failed to get student")),
    };

    // 排名需要所有在读学生的综合成绩
    let aggregates = match storage.student_aggregates().await {
        Ok(aggregates) => aggregates,
        Err(e) => return Ok(error_response(&e, "Failed to aggregate student scores")),
    };

    let semesters = match storage
        .semester_breakdown(SemesterQueryParams {
            student_id: Some(student_id),
            ..Default::default()
        })
        .await
    {
        Ok(semesters) => semesters,
        Err(e) => return Ok(error_response(&e, "Failed to aggregate semester scores")),
    };

    let subjects = match storage.subject_averages(student_id).await {
        Ok(subjects) => subjects,
        Err(e) => return Ok(error_response(&e, "Failed to aggregate subject scores")),
    };

    let achievement_count = match storage
        .list_activities_with_pagination(ActivityListQuery {
            page: Some(1),
            size: Some(1),
            student_id: Some(student_id),
            achievement_only: Some(true),
            ..Default::default()
        })
        .await
    {
        Ok(response) => response.pagination.total,
        Err(e) => return Ok(error_response(&e, "Failed to count achievements")),
    };

    let weights = GradeWeights::from_config(&AppConfig::get().grading);
    let cards: Vec<_> = aggregates
        .iter()
        .map(|aggregate| (aggregate.student_id, score_card(aggregate, &weights)))
        .collect();
    let population: Vec<f64> = cards.iter().filter_map(|(_, card)| card.overall).collect();

    let own = aggregates.iter().find(|a| a.student_id == student_id);
    let scores = match cards.iter().find(|(id, _)| *id == student_id) {
        Some((_, card)) => card.clone(),
        None => score_card(&Default::default(), &weights),
    };
    let percentile_rank = scores
        .overall
        .and_then(|overall| percentile_rank(overall, &population));

    let (total, present, activity_count) = own
        .map(|a| {
            (
                a.attendance_total,
                a.attendance_present,
                a.activity_categories.len() as i64,
            )
        })
        .unwrap_or_default();

    let profile = StudentProfileResponse {
        student,
        scores,
        semesters,
        subjects,
        attendance: AttendanceSummary {
            total,
            present,
            rate: (total > 0).then(|| round2(present as f64 / total as f64 * 100.0)),
        },
        activity_count,
        achievement_count,
        percentile_rank,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        profile,
        "Student profile retrieved successfully",
    )))
}
