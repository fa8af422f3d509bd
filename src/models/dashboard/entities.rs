use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单个学生的聚合原始数据，由存储层一次性汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentAggregate {
    pub student_id: i64,
    pub name: String,
    pub discipline: Option<String>,
    pub grade_count: i64,
    pub grade_sum: f64,
    pub attendance_total: i64,
    pub attendance_present: i64,
    // 每条活动的类别，未分类为 None
    pub activity_categories: Vec<Option<String>>,
}
