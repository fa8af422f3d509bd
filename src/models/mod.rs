pub mod activities;
pub mod attendance;
pub mod common;
pub mod dashboard;
pub mod error_code;
pub mod grades;
pub mod students;
pub mod subjects;
pub mod system;
pub mod upload;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};
pub use error_code::ErrorCode;

/// 程序启动时间，用于计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
