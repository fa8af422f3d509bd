use super::entities::AttendanceEvent;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 考勤列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<AttendanceEvent>,
}
