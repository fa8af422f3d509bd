use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::StudentStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::query::deserialize_optional_from_str;

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default)]
    pub discipline: Option<String>,
    #[serde(default, rename = "class")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub status: Option<StudentStatus>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub has_achievement: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub enrollment_year_from: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub enrollment_year_to: Option<i32>,
}

// 学生创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub discipline: Option<String>,
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub enrollment_year: Option<i32>,
    #[serde(default)]
    pub admission_date: Option<NaiveDate>,
}

// 学生更新请求，未提供的字段保持不变
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub discipline: Option<String>,
    pub student_number: Option<String>,
    pub enrollment_year: Option<i32>,
    pub admission_date: Option<NaiveDate>,
}

// 删除参数，purge=true 时物理删除并级联清理
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct DeleteStudentParams {
    #[serde(default)]
    pub purge: bool,
}

// 导出参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentExportParams {
    #[serde(default = "default_export_format")]
    pub format: String,
    pub discipline: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub has_achievement: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub enrollment_year_from: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub enrollment_year_to: Option<i32>,
}

impl From<StudentExportParams> for StudentListQuery {
    fn from(params: StudentExportParams) -> Self {
        Self {
            page: None,
            size: None,
            discipline: params.discipline,
            class_name: params.class_name,
            status: params.status,
            search: params.search,
            has_achievement: params.has_achievement,
            enrollment_year_from: params.enrollment_year_from,
            enrollment_year_to: params.enrollment_year_to,
        }
    }
}

fn default_export_format() -> String {
    "csv".to_string()
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub discipline: Option<String>,
    pub class_name: Option<String>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
    pub has_achievement: Option<bool>,
    pub enrollment_year_from: Option<i32>,
    pub enrollment_year_to: Option<i32>,
}

impl From<StudentQueryParams> for StudentListQuery {
    fn from(params: StudentQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            discipline: params.discipline,
            class_name: params.class_name,
            status: params.status,
            search: params.search,
            has_achievement: params.has_achievement,
            enrollment_year_from: params.enrollment_year_from,
            enrollment_year_to: params.enrollment_year_to,
        }
    }
}
