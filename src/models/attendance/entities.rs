use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 考勤记录，每个学生每天一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceEvent {
    pub id: i64,
    pub student_id: i64,
    pub date: chrono::NaiveDate,
    pub present: bool,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
