use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::upload::entities::UploadKind;
use crate::utils::spreadsheet::spreadsheet_response;

/// 模板表头与示例行
fn template_rows(kind: UploadKind) -> (&'static [&'static str], &'static [&'static str]) {
    match kind {
        UploadKind::Students => (
            &[
                "name",
                "class",
                "discipline",
                "student_number",
                "enrollment_year",
                "admission_date",
            ],
            &["Asha", "10B", "Science", "S2024-001", "2024", "2024-06-01"],
        ),
        UploadKind::Subjects => (
            &["code", "name", "discipline"],
            &["MATH101", "Mathematics", "Science"],
        ),
        UploadKind::Grades => (
            &["student_number", "subject_code", "semester", "score"],
            &["S2024-001", "MATH101", "S1", "88.5"],
        ),
        UploadKind::Attendance => (
            &["student_number", "date", "present", "note"],
            &["S2024-001", "2025-01-15", "yes", ""],
        ),
        UploadKind::Activities => (
            &[
                "student_number",
                "activity_name",
                "category",
                "date",
                "achievement",
            ],
            &[
                "S2024-001",
                "Inter-school debate",
                "DEBATE",
                "2025-02-20",
                "Runner-up",
            ],
        ),
    }
}

pub fn download_template(kind: UploadKind, format: &str) -> ActixResult<HttpResponse> {
    let (headers, example) = template_rows(kind);
    let rows = vec![example.iter().map(|v| v.to_string()).collect::<Vec<_>>()];
    spreadsheet_response(format, &format!("{kind}_template"), headers, &rows)
}
