//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_dashboard_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DashboardError {
            $($variant(String),)*
        }

        impl DashboardError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DashboardError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DashboardError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DashboardError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl DashboardError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DashboardError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_dashboard_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Conflict("E009", "Resource Conflict"),
    Serialization("E010", "Serialization Error"),
    DateParse("E011", "Date Parse Error"),
    Import("E012", "Import Error"),
}

impl DashboardError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为客户端可修正的错误（4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DashboardError::Validation(_)
                | DashboardError::NotFound(_)
                | DashboardError::Conflict(_)
                | DashboardError::DateParse(_)
                | DashboardError::Import(_)
        )
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DashboardError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for DashboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => DashboardError::Conflict(msg),
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                DashboardError::NotFound(msg)
            }
            _ => DashboardError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DashboardError {
    fn from(err: chrono::ParseError) -> Self {
        DashboardError::DateParse(err.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::Import(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DashboardError::cache_connection("test").code(), "E001");
        assert_eq!(DashboardError::database_config("test").code(), "E003");
        assert_eq!(DashboardError::validation("test").code(), "E007");
        assert_eq!(DashboardError::conflict("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DashboardError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            DashboardError::not_found("test").error_type(),
            "Resource Not Found"
        );
    }

    #[test]
    fn test_error_message() {
        let err = DashboardError::validation("Invalid score");
        assert_eq!(err.message(), "Invalid score");
    }

    #[test]
    fn test_format_simple() {
        let err = DashboardError::validation("Invalid semester");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid semester"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DashboardError::validation("x").is_client_error());
        assert!(DashboardError::conflict("x").is_client_error());
        assert!(!DashboardError::database_operation("x").is_client_error());
        assert!(!DashboardError::database_connection("x").is_client_error());
    }
}
