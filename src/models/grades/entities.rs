use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学期，固定为 S1 到 S8
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum Semester {
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
}

impl Semester {
    pub const ALL: [Semester; 8] = [
        Semester::S1,
        Semester::S2,
        Semester::S3,
        Semester::S4,
        Semester::S5,
        Semester::S6,
        Semester::S7,
        Semester::S8,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::S1 => "S1",
            Semester::S2 => "S2",
            Semester::S3 => "S3",
            Semester::S4 => "S4",
            Semester::S5 => "S5",
            Semester::S6 => "S6",
            Semester::S7 => "S7",
            Semester::S8 => "S8",
        }
    }
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Semester>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Semester {
    type Err = String;

    // 大小写不敏感，允许首尾空白
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Semester::ALL
            .iter()
            .find(|sem| sem.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Invalid semester '{s}', expected one of S1..S8"))
    }
}

/// 成绩记录，(student_id, subject_id, semester) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeRecord {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub semester: Semester,
    pub score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
