use super::entities::ActivityLog;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 活动列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ActivityLog>,
}
