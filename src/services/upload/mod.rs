pub mod import;
pub mod table;
pub mod template;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::upload::entities::UploadKind;
use crate::storage::Storage;

pub struct UploadService {
    storage: Option<Arc<dyn Storage>>,
}

impl UploadService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 导入 CSV/XLSX 文件
    pub async fn import(
        &self,
        request: &HttpRequest,
        kind: UploadKind,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        import::import_file(self, request, kind, payload).await
    }

    // 下载导入模板
    pub async fn template(&self, kind: UploadKind, format: &str) -> ActixResult<HttpResponse> {
        template::download_template(kind, format)
    }
}
