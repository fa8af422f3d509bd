use serde::Deserialize;
use ts_rs::TS;

use super::entities::UploadKind;

// 上传参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/upload.ts")]
pub struct UploadParams {
    pub kind: UploadKind,
}

// 模板下载参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/upload.ts")]
pub struct TemplateParams {
    pub kind: UploadKind,
    #[serde(default = "default_template_format")]
    pub format: String,
}

fn default_template_format() -> String {
    "csv".to_string()
}
