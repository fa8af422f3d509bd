use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum StudentStatus {
    Active,    // 在读
    Withdrawn, // 已退学（软删除）
}

impl StudentStatus {
    pub const ACTIVE: &'static str = "active";
    pub const WITHDRAWN: &'static str = "withdrawn";
}

impl<'de> Deserialize<'de> for StudentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<StudentStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的学生状态: '{s}'. 支持的状态: active, withdrawn"
            ))
        })
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentStatus::Active => write!(f, "{}", StudentStatus::ACTIVE),
            StudentStatus::Withdrawn => write!(f, "{}", StudentStatus::WITHDRAWN),
        }
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            StudentStatus::ACTIVE => Ok(StudentStatus::Active),
            StudentStatus::WITHDRAWN => Ok(StudentStatus::Withdrawn),
            _ => Err(format!("Invalid student status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    // 学号，可选，存在时唯一
    pub student_number: Option<String>,
    pub name: String,
    // 班级，例如 "10B"
    #[serde(rename = "class")]
    pub class_name: String,
    // 学科方向，例如 "Science"
    pub discipline: Option<String>,
    pub enrollment_year: Option<i32>,
    pub admission_date: Option<NaiveDate>,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub withdrawn_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_strings() {
        assert_eq!("active".parse::<StudentStatus>(), Ok(StudentStatus::Active));
        assert_eq!(StudentStatus::Withdrawn.to_string(), "withdrawn");
        assert!("deleted".parse::<StudentStatus>().is_err());
    }

    #[test]
    fn test_student_serializes_class_field() {
        let now = Utc::now();
        let student = Student {
            id: 1,
            student_number: None,
            name: "Asha".to_string(),
            class_name: "10B".to_string(),
            discipline: None,
            enrollment_year: None,
            admission_date: None,
            status: StudentStatus::Active,
            created_at: now,
            updated_at: now,
            withdrawn_at: None,
        };
        let value = serde_json::to_value(&student).expect("serialize");
        assert_eq!(value["class"], "10B");
        assert_eq!(value["status"], "active");
    }
}
