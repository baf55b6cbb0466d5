use serde::Serialize;

// 响应错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证相关 2xxx
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserEmailAlreadyExists = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
}
