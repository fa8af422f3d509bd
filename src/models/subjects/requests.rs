use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 科目查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default)]
    pub discipline: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

// 创建科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub discipline: Option<String>,
}

// 更新科目请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub discipline: Option<String>,
}

// 科目列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub discipline: Option<String>,
    pub search: Option<String>,
}

impl From<SubjectQueryParams> for SubjectListQuery {
    fn from(params: SubjectQueryParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            discipline: params.discipline,
            search: params.search,
        }
    }
}
