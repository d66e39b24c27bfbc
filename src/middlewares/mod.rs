pub mod audit;
pub mod rate_limit;
pub mod request_trace;
pub mod require_jwt;
pub mod require_role;

use actix_web::{HttpResponse, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

pub use audit::AuditLogger;
pub use rate_limit::RateLimit;
pub use request_trace::RequestTrace;
pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

// 中间件直接返回的错误响应，与服务层使用相同的信封结构
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}
