//! 路径参数提取器
//!
//! 非法的 UUID 直接返回 400 统一响应，不进入处理函数。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::models::{ApiResponse, ErrorCode};

/// 从 `{id}` 路径段解析的 UUID
#[derive(Debug, Clone, Copy)]
pub struct SafeUuid(pub Uuid);

impl FromRequest for SafeUuid {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();
        ready(parse_uuid(raw).map(SafeUuid).map_err(|msg| {
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg));
            InternalError::from_response(msg, response).into()
        }))
    }
}

fn parse_uuid(raw: &str) -> Result<Uuid, &'static str> {
    if raw.is_empty() {
        return Err("Missing resource id");
    }
    Uuid::parse_str(raw).map_err(|_| "Invalid resource id, expected a UUID")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string()), Ok(id));
        assert!(parse_uuid("").is_err());
        assert!(parse_uuid("42").is_err());
    }

    #[actix_web::test]
    async fn test_extractor_rejects_bad_id() {
        let req = TestRequest::default()
            .param("id", "not-a-uuid")
            .to_http_request();
        let result = SafeUuid::extract(&req).await;
        let err = result.expect_err("bad id must be rejected");
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }
}
