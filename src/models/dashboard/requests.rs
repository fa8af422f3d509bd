use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::query::deserialize_optional_from_str;

// 学期趋势查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct SemesterQueryParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub discipline: Option<String>,
}

impl SemesterQueryParams {
    /// 缓存键，不同筛选条件各自缓存
    pub fn cache_key(&self) -> String {
        format!(
            "dashboard:semesters:{}:{}:{}",
            self.student_id.map(|v| v.to_string()).unwrap_or_default(),
            self.subject_id.map(|v| v.to_string()).unwrap_or_default(),
            self.discipline.as_deref().unwrap_or_default()
        )
    }
}

/// 排名依据
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum RankingMetric {
    #[default]
    Overall,
    Academic,
    Cocurricular,
    Attendance,
}

impl RankingMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMetric::Overall => "overall",
            RankingMetric::Academic => "academic",
            RankingMetric::Cocurricular => "cocurricular",
            RankingMetric::Attendance => "attendance",
        }
    }
}

// 排名查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RankingQueryParams {
    #[serde(default)]
    pub sort_by: RankingMetric,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub limit: Option<usize>,
    #[serde(default)]
    pub discipline: Option<String>,
}

impl RankingQueryParams {
    pub fn cache_key(&self) -> String {
        format!(
            "dashboard:rankings:{}:{}:{}",
            self.sort_by.as_str(),
            self.limit.map(|v| v.to_string()).unwrap_or_default(),
            self.discipline.as_deref().unwrap_or_default()
        )
    }
}
