use serde::{Deserialize, Serialize};

/// 业务错误码，随响应信封中的 `code` 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用客户端错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    RateLimitExceeded = 1006,

    // 认证
    AuthFailed = 2000,
    AccountLocked = 2001,
    AccountInactive = 2002,

    // 服务端错误
    InternalServerError = 5000,
    ServiceUnavailable = 5003,
}

impl ErrorCode {
    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }
}
