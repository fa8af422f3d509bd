use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 导入数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/upload.ts")]
pub enum UploadKind {
    Students,
    Subjects,
    Grades,
    Attendance,
    Activities,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Students => "students",
            UploadKind::Subjects => "subjects",
            UploadKind::Grades => "grades",
            UploadKind::Attendance => "attendance",
            UploadKind::Activities => "activities",
        }
    }
}

impl std::fmt::Display for UploadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单行导入失败信息，row 从 1 开始且表头为第 1 行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/upload.ts")]
pub struct ImportRowError {
    pub row: usize,
    pub field: String,
    pub message: String,
}
