use super::entities::Subject;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 科目列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Subject>,
}
