use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::requests::RankingMetric;
use crate::models::grades::entities::Semester;

// 在读学生的各项记录数量
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardTotals {
    pub students: i64,
    pub subjects: i64,
    pub grades: i64,
    pub attendance_events: i64,
    pub activities: i64,
}

// 等级分布
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct GradeBucket {
    pub grade: String,
    pub count: i64,
}

// 按学科方向统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DisciplineAverage {
    pub discipline: String,
    pub students: i64,
    pub average_score: Option<f64>,
    pub average_overall: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct OverviewResponse {
    pub totals: DashboardTotals,
    pub average_score: Option<f64>,
    pub attendance_rate: Option<f64>,
    pub grade_distribution: Vec<GradeBucket>,
    pub disciplines: Vec<DisciplineAverage>,
}

// 学期成绩汇总
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct SemesterBreakdown {
    pub semester: Semester,
    pub count: i64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct SemesterTrendResponse {
    pub items: Vec<SemesterBreakdown>,
}

/// 描述性统计，std 与 variance 为样本统计量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DescriptiveStats {
    pub count: i64,
    pub mean: f64,
    pub std: Option<f64>,
    pub variance: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub range: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ComponentCorrelation {
    pub component: String,
    pub coefficient: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StatisticsResponse {
    pub student_count: i64,
    pub academic: Option<DescriptiveStats>,
    pub cocurricular: Option<DescriptiveStats>,
    pub attendance: Option<DescriptiveStats>,
    pub overall: Option<DescriptiveStats>,
    // 各分项与综合成绩的皮尔逊相关系数
    pub correlations: Vec<ComponentCorrelation>,
}

/// 单个学生的综合评分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ScoreCard {
    pub academic: Option<f64>,
    pub cocurricular: f64,
    pub attendance: f64,
    pub overall: Option<f64>,
    pub academic_grade: Option<String>,
    pub overall_grade: Option<String>,
}

// 排名中的学生，rank 从 1 开始按所选指标降序
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RankedStudent {
    pub rank: usize,
    pub student_id: i64,
    pub name: String,
    pub discipline: Option<String>,
    pub score: f64,
    pub score_card: ScoreCard,
}

/// 单个学生三项分数之间的最大差距
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct PerformanceGap {
    pub student_id: i64,
    pub name: String,
    pub academic: f64,
    pub cocurricular: f64,
    pub attendance: f64,
    pub max_gap: f64,
    // 差距最大的两项，例如 "academic-attendance"
    pub widest_pair: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct GapSummary {
    pub average_gap: f64,
    pub median_gap: f64,
    pub largest_gap: f64,
    // 最大差距超过 20 分的学生占比
    pub significant_gap_percent: f64,
    pub most_common_pair: String,
    pub most_common_pair_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct RankingsResponse {
    pub sort_by: RankingMetric,
    // 参与排名的学生数（有学业成绩的在读学生）
    pub ranked_students: usize,
    pub top: Vec<RankedStudent>,
    pub bottom: Vec<RankedStudent>,
    pub largest_gaps: Vec<PerformanceGap>,
    pub most_balanced: Vec<PerformanceGap>,
    pub gap_summary: Option<GapSummary>,
}
