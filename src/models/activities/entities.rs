use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 课外活动记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityLog {
    pub id: i64,
    pub student_id: i64,
    pub activity_name: String,
    // 活动类别，例如 SPORTS、MUSIC
    pub category: Option<String>,
    pub date: chrono::NaiveDate,
    // 获奖或成就描述
    pub achievement: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
