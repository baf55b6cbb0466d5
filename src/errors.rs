//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及到 HTTP 状态的映射。

use std::fmt;

use actix_web::http::StatusCode;

use crate::models::ErrorCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_lms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum LmsError {
            $($variant(String),)*
        }

        impl LmsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LmsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_lms_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Serialization("E004", "Serialization Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Forbidden("E008", "Forbidden"),
    Conflict("E009", "Conflict"),
    Authentication("E010", "Authentication Error"),
}

impl LmsError {
    /// 是否为基础设施错误（对外只返回通用信息）
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            LmsError::DatabaseConfig(_)
                | LmsError::DatabaseConnection(_)
                | LmsError::DatabaseOperation(_)
                | LmsError::Serialization(_)
        )
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            LmsError::Validation(_) => StatusCode::BAD_REQUEST,
            LmsError::NotFound(_) => StatusCode::NOT_FOUND,
            LmsError::Forbidden(_) => StatusCode::FORBIDDEN,
            LmsError::Conflict(_) => StatusCode::CONFLICT,
            LmsError::Authentication(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的响应错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            LmsError::Validation(_) => ErrorCode::BadRequest,
            LmsError::NotFound(_) => ErrorCode::NotFound,
            LmsError::Forbidden(_) => ErrorCode::Forbidden,
            LmsError::Conflict(_) => ErrorCode::Conflict,
            LmsError::Authentication(_) => ErrorCode::Unauthorized,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 对外展示的信息，内部错误不泄露细节
    pub fn public_message(&self) -> &str {
        if self.is_internal() {
            "Server error"
        } else {
            self.message()
        }
    }

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
}

impl fmt::Display for LmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LmsError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LmsError {
    fn from(err: sea_orm::DbErr) -> Self {
        LmsError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LmsError {
    fn from(err: serde_json::Error) -> Self {
        LmsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;
