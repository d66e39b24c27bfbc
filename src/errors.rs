//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 错误类型实现了 `ResponseError`，服务层可以直接通过 `?` 返回统一的响应信封。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::{DbErr, SqlErr};

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_edusystem_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EduSystemError {
            $($variant(String),)*
        }

        impl EduSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_edusystem_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Resource Conflict"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    AccountLocked("E012", "Account Locked"),
    Internal("E013", "Internal Error"),
}

impl EduSystemError {
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

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            EduSystemError::Validation(_)
            | EduSystemError::Serialization(_)
            | EduSystemError::DateParse(_) => StatusCode::BAD_REQUEST,
            EduSystemError::NotFound(_) => StatusCode::NOT_FOUND,
            EduSystemError::Conflict(_) => StatusCode::CONFLICT,
            EduSystemError::Authentication(_) => StatusCode::UNAUTHORIZED,
            EduSystemError::Authorization(_) => StatusCode::FORBIDDEN,
            EduSystemError::AccountLocked(_) => StatusCode::LOCKED,
            EduSystemError::CacheConnection(_)
            | EduSystemError::DatabaseConfig(_)
            | EduSystemError::DatabaseConnection(_)
            | EduSystemError::DatabaseOperation(_)
            | EduSystemError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            EduSystemError::Validation(_)
            | EduSystemError::Serialization(_)
            | EduSystemError::DateParse(_) => ErrorCode::ValidationFailed,
            EduSystemError::NotFound(_) => ErrorCode::NotFound,
            EduSystemError::Conflict(_) => ErrorCode::Conflict,
            EduSystemError::Authentication(_) => ErrorCode::Unauthorized,
            EduSystemError::Authorization(_) => ErrorCode::Forbidden,
            EduSystemError::AccountLocked(_) => ErrorCode::AccountLocked,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 面向客户端的错误信息，生产环境隐藏 5xx 细节
    pub fn public_message(&self) -> String {
        self.public_message_for(AppConfig::get().is_production())
    }

    fn public_message_for(&self, production: bool) -> String {
        if production && self.http_status().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.message().to_string()
        }
    }
}

impl fmt::Display for EduSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduSystemError {}

impl ResponseError for EduSystemError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(status).json(ApiResponse::error_empty(
            self.error_code(),
            self.public_message(),
        ))
    }
}

/// 将数据库错误转换为带上下文的业务错误
///
/// 唯一约束冲突映射为 Conflict，外键约束失败映射为 Validation。
pub fn map_db_err(context: &'static str) -> impl Fn(DbErr) -> EduSystemError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            EduSystemError::conflict(format!("{context}: duplicate value ({detail})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            EduSystemError::validation(format!("{context}: referenced record missing ({detail})"))
        }
        _ => EduSystemError::database_operation(format!("{context}: {err}")),
    }
}

// 为常见的错误类型实现 From trait
impl From<DbErr> for EduSystemError {
    fn from(err: DbErr) -> Self {
        map_db_err("Database error")(err)
    }
}

impl From<serde_json::Error> for EduSystemError {
    fn from(err: serde_json::Error) -> Self {
        EduSystemError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduSystemError {
    fn from(err: chrono::ParseError) -> Self {
        EduSystemError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduSystemError::cache_connection("test").code(), "E001");
        assert_eq!(EduSystemError::database_config("test").code(), "E002");
        assert_eq!(EduSystemError::validation("test").code(), "E005");
        assert_eq!(EduSystemError::authentication("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EduSystemError::conflict("test").error_type(),
            "Resource Conflict"
        );
        assert_eq!(
            EduSystemError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = EduSystemError::validation("Invalid code");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid code"));
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            EduSystemError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EduSystemError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EduSystemError::conflict("x").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            EduSystemError::authentication("x").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            EduSystemError::authorization("x").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            EduSystemError::account_locked("x").http_status(),
            StatusCode::LOCKED
        );
        assert_eq!(
            EduSystemError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_error_message_hidden_in_production() {
        let err = EduSystemError::database_operation("table students is locked");
        assert_eq!(err.public_message_for(true), "Internal server error");
        assert_eq!(err.public_message_for(false), "table students is locked");

        // 4xx 信息在生产环境保持原样
        let err = EduSystemError::conflict("course is full");
        assert_eq!(err.public_message_for(true), "course is full");
    }

    #[test]
    fn test_generic_db_error_maps_to_operation() {
        let err = map_db_err("Query failed")(DbErr::Custom("boom".into()));
        assert!(matches!(err, EduSystemError::DatabaseOperation(_)));
        assert!(err.message().starts_with("Query failed"));
    }
}
