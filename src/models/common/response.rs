use serde::{Deserialize, Serialize};

use crate::models::ErrorCode;
use crate::models::common::{PaginatedResponse, PaginationMeta};

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T> {
    fn build(code: ErrorCode, message: String, data: Option<T>, meta: Option<PaginationMeta>) -> Self {
        Self {
            success: code.is_success(),
            code: code as i32,
            message,
            data,
            meta,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, message.into(), Some(data), None)
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self::build(code, message.into(), Some(data), None)
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// 列表响应：数据放在 data，分页信息放在 meta
    pub fn paginated(page: PaginatedResponse<T>, message: impl Into<String>) -> Self {
        Self::build(
            ErrorCode::Success,
            message.into(),
            Some(page.items),
            Some(page.pagination),
        )
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, message.into(), None, None)
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, message.into(), None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(42, "ok");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], 42);
        assert!(json.get("meta").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_error_envelope_has_no_data() {
        let resp = ApiResponse::error_empty(ErrorCode::NotFound, "Student not found");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 1004);
        assert_eq!(json["message"], "Student not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_paginated_envelope() {
        let page = PaginatedResponse {
            items: vec!["a", "b"],
            pagination: PaginationMeta::new(1, 2, 5),
        };
        let json = serde_json::to_value(ApiResponse::paginated(page, "ok")).unwrap();
        assert_eq!(json["data"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(json["meta"]["total"], 5);
        assert_eq!(json["meta"]["total_pages"], 3);
        assert_eq!(json["meta"]["has_next"], true);
        assert_eq!(json["meta"]["has_prev"], false);
    }
}
