use serde::Serialize;
use ts_rs::TS;

use super::entities::Student;
use crate::models::common::PaginationInfo;
use crate::models::dashboard::responses::{ScoreCard, SemesterBreakdown};

// 学生列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Student>,
}

// 单科平均分
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct SubjectAverage {
    pub subject_id: i64,
    pub subject_code: String,
    pub subject_name: String,
    pub count: i64,
    pub average: f64,
}

// 考勤汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub rate: Option<f64>,
}

// 学生画像
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentProfileResponse {
    pub student: Student,
    pub scores: ScoreCard,
    pub semesters: Vec<SemesterBreakdown>,
    pub subjects: Vec<SubjectAverage>,
    pub attendance: AttendanceSummary,
    pub activity_count: i64,
    pub achievement_count: i64,
    // 综合成绩严格低于该学生的在读学生占比 ×100
    pub percentile_rank: Option<f64>,
}
