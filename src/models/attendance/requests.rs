use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::models::common::query::deserialize_optional_from_str;

// 考勤查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub student_id: Option<i64>,
    // 日期范围，两端包含
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub present: Option<bool>,
}

// 录入考勤请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CreateAttendanceRequest {
    pub student_id: i64,
    pub date: NaiveDate,
    pub present: bool,
    #[serde(default)]
    pub note: Option<String>,
}

// 更新考勤请求，学生和日期不可修改
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub present: Option<bool>,
    pub note: Option<String>,
}

// 考勤列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub present: Option<bool>,
}

impl From<AttendanceQueryParams> for AttendanceListQuery {
    fn from(params: AttendanceQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            from: params.from,
            to: params.to,
            present: params.present,
        }
    }
}
