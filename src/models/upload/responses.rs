use serde::Serialize;
use ts_rs::TS;

use super::entities::{ImportRowError, UploadKind};

// 导入结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/upload.ts")]
pub struct UploadResponse {
    pub kind: UploadKind,
    pub total: usize,
    pub inserted: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}
