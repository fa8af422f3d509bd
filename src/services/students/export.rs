//! 学生导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::StudentService;
use crate::config::AppConfig;
use crate::models::dashboard::responses::ScoreCard;
use crate::models::students::entities::Student;
use crate::models::students::requests::{StudentExportParams, StudentListQuery};
use crate::utils::error_response;
use crate::utils::grading::{GradeWeights, score_card};
use crate::utils::spreadsheet::spreadsheet_response;

// 单次最多导出的学生数
const EXPORT_LIMIT: u64 = 10000;

const EXPORT_HEADERS: [&str; 15] = [
    "id",
    "student_number",
    "name",
    "class",
    "discipline",
    "enrollment_year",
    "admission_date",
    "status",
    "created_at",
    "academic_score",
    "cocurricular_score",
    "attendance_score",
    "overall_score",
    "academic_grade",
    "overall_grade",
];

pub async fn export_students(
    service: &StudentService,
    request: &HttpRequest,
    params: StudentExportParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let format = params.format.clone();
    let query = StudentListQuery::from(params);

    let students = match storage.list_students_for_export(query, EXPORT_LIMIT).await {
        Ok(students) => students,
        Err(e) => return Ok(error_response(&e, "Failed to export students")),
    };

    // 退学学生没有聚合数据，对应的分数列留空
    let aggregates = match storage.student_aggregates().await {
        Ok(aggregates) => aggregates,
        Err(e) => return Ok(error_response(&e, "Failed to aggregate student scores")),
    };
    let weights = GradeWeights::from_config(&AppConfig::get().grading);
    let cards: HashMap<i64, ScoreCard> = aggregates
        .iter()
        .map(|a| (a.student_id, score_card(a, &weights)))
        .collect();

    let rows: Vec<Vec<String>> = students
        .iter()
        .map(|student| student_row(student, cards.get(&student.id)))
        .collect();
    spreadsheet_response(&format, "students", &EXPORT_HEADERS, &rows)
}

fn score_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn student_row(student: &Student, card: Option<&ScoreCard>) -> Vec<String> {
    vec![
        student.id.to_string(),
        student.student_number.clone().unwrap_or_default(),
        student.name.clone(),
        student.class_name.clone(),
        student.discipline.clone().unwrap_or_default(),
        student
            .enrollment_year
            .map(|y| y.to_string())
            .unwrap_or_default(),
        student
            .admission_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        student.status.to_string(),
        student.created_at.to_rfc3339(),
        score_cell(card.and_then(|c| c.academic)),
        score_cell(card.map(|c| c.cocurricular)),
        score_cell(card.map(|c| c.attendance)),
        score_cell(card.and_then(|c| c.overall)),
        card.and_then(|c| c.academic_grade.clone()).unwrap_or_default(),
        card.and_then(|c| c.overall_grade.clone()).unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::StudentStatus;
    use chrono::Utc;

    fn student() -> Student {
        Student {
            id: 7,
            student_number: Some("S-007".to_string()),
            name: "Asha".to_string(),
            class_name: "10A".to_string(),
            discipline: Some("Science".to_string()),
            enrollment_year: Some(2024),
            admission_date: None,
            status: StudentStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            withdrawn_at: None,
        }
    }

    #[test]
    fn test_row_matches_headers_with_scores() {
        let card = ScoreCard {
            academic: Some(88.5),
            cocurricular: 75.0,
            attendance: 100.0,
            overall: Some(88.1),
            academic_grade: Some("A".to_string()),
            overall_grade: Some("A".to_string()),
        };
        let row = student_row(&student(), Some(&card));
        assert_eq!(row.len(), EXPORT_HEADERS.len());
        assert_eq!(&row[9..], &["88.50", "75.00", "100.00", "88.10", "A", "A"]);
    }

    #[test]
    fn test_row_without_grades_leaves_score_cells_blank() {
        let card = ScoreCard {
            academic: None,
            cocurricular: 0.0,
            attendance: 100.0,
            overall: None,
            academic_grade: None,
            overall_grade: None,
        };
        let row = student_row(&student(), Some(&card));
        assert_eq!(&row[9..], &["", "0.00", "100.00", "", "", ""]);

        let row = student_row(&student(), None);
        assert!(row[9..].iter().all(String::is_empty));
    }
}
