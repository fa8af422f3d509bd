//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod activity_logs;
pub mod attendance_events;
pub mod grades;
pub mod students;
pub mod subjects;

/// 日期在库中统一存储为 `YYYY-MM-DD` 字符串，字典序即时间序
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_stored_date(value: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(value, STORED_DATE_FORMAT)
}

pub fn format_stored_date(date: chrono::NaiveDate) -> String {
    date.format(STORED_DATE_FORMAT).to_string()
}
