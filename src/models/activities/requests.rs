use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::models::common::query::deserialize_optional_from_str;

// 活动查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub achievement_only: Option<bool>,
}

// 录入活动请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct CreateActivityRequest {
    pub student_id: i64,
    pub activity_name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub achievement: Option<String>,
}

// 更新活动请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct UpdateActivityRequest {
    pub activity_name: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub achievement: Option<String>,
}

// 活动列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub achievement_only: Option<bool>,
}

impl From<ActivityQueryParams> for ActivityListQuery {
    fn from(params: ActivityQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            category: params.category,
            search: params.search,
            from: params.from,
            to: params.to,
            achievement_only: params.achievement_only,
        }
    }
}
