use serde::Deserialize;
use ts_rs::TS;

use super::entities::Semester;
use crate::models::common::PaginationQuery;
use crate::models::common::query::deserialize_optional_from_str;

// 成绩查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub semester: Option<Semester>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub min_score: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub max_score: Option<f64>,
}

// 录入成绩请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub semester: Semester,
    pub score: f64,
}

// 更新成绩请求，只允许修改分数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateGradeRequest {
    pub score: f64,
}

// 成绩列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub semester: Option<Semester>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}

impl From<GradeQueryParams> for GradeListQuery {
    fn from(params: GradeQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            subject_id: params.subject_id,
            semester: params.semester,
            min_score: params.min_score,
            max_score: params.max_score,
        }
    }
}
