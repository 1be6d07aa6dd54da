//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_oes_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum OesError {
            $($variant(String),)*
        }

        impl OesError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(OesError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(OesError::$variant(_) => $type_name,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(OesError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(OesError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl OesError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        OesError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_oes_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR),
    FileOperation("E004", "File Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E005", "Validation Error", BAD_REQUEST),
    NotFound("E006", "Resource Not Found", NOT_FOUND),
    UniqueViolation("E007", "Uniqueness Violation", CONFLICT),
    ForeignKeyViolation("E008", "Foreign Key Violation", CONFLICT),
    MalformedInput("E009", "Malformed Input", BAD_REQUEST),
    FileTooLarge("E010", "File Too Large", PAYLOAD_TOO_LARGE),
    Serialization("E011", "Serialization Error", INTERNAL_SERVER_ERROR),
    Authentication("E012", "Authentication Error", UNAUTHORIZED),
    Authorization("E013", "Authorization Error", FORBIDDEN),
}

impl OesError {
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

    /// 是否为服务端故障（存储或磁盘），需要按 500 处理
    pub fn is_fatal(&self) -> bool {
        self.status().is_server_error()
    }
}

impl fmt::Display for OesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for OesError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for OesError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                OesError::UniqueViolation(msg)
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                OesError::ForeignKeyViolation(msg)
            }
            _ => OesError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for OesError {
    fn from(err: std::io::Error) -> Self {
        OesError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for OesError {
    fn from(err: serde_json::Error) -> Self {
        OesError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for OesError {
    fn from(err: csv::Error) -> Self {
        OesError::MalformedInput(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for OesError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        OesError::Authentication(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OesError>;
