use super::entities::GradeRecord;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 成绩列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<GradeRecord>,
}
