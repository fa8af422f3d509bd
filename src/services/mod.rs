pub mod activities;
pub mod attendance;
pub mod dashboard;
pub mod grades;
pub mod students;
pub mod subjects;
pub mod system;
pub mod upload;

pub use activities::ActivityService;
pub use attendance::AttendanceService;
pub use dashboard::DashboardService;
pub use grades::GradeService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use upload::UploadService;

use actix_web::HttpRequest;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::cache::ObjectCache;

/// 从请求中获取缓存实例
pub(crate) fn request_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

// 看板缓存代次，每次写操作后递增
static DASHBOARD_GENERATION: AtomicU64 = AtomicU64::new(0);

/// 当前代次下的看板缓存键
///
/// 读取方在计算前取键；计算期间若发生写入，结果只会写到旧代次的键上，之后不再被读取。
pub(crate) fn dashboard_cache_key(base: &str) -> String {
    format!("{base}@{}", DASHBOARD_GENERATION.load(Ordering::Acquire))
}

/// 写操作成功后清理看板缓存
///
/// 缓存中只保存看板聚合结果，因此整体清空。
pub(crate) async fn invalidate_dashboard_cache(request: &HttpRequest) {
    DASHBOARD_GENERATION.fetch_add(1, Ordering::AcqRel);
    if let Some(cache) = request_cache(request) {
        cache.invalidate_all().await;
        debug!("Dashboard cache invalidated after write");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use actix_web::test::TestRequest;
    use actix_web::web;

    #[actix_web::test]
    async fn test_write_moves_dashboard_key_to_new_generation() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let request = TestRequest::default()
            .app_data(web::Data::new(cache.clone()))
            .to_http_request();

        // 读取方在写入前取得键，写入完成后才把旧结果放回缓存
        let stale_key = dashboard_cache_key("dashboard:overview");
        invalidate_dashboard_cache(&request).await;
        cache.insert_json(&stale_key, &"stale", 0).await;

        let fresh_key = dashboard_cache_key("dashboard:overview");
        assert_ne!(stale_key, fresh_key);
        assert!(cache.get_json::<String>(&fresh_key).await.is_none());
        assert!(fresh_key.starts_with("dashboard:overview@"));
    }
}
