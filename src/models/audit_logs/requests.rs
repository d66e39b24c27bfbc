use serde::Deserialize;
use uuid::Uuid;

use super::entities::AuditAction;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::{deserialize_optional_bool, deserialize_optional_i64};

// 审计日志查询，from/to 为 unix 秒
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub user_id: Option<Uuid>,
    pub resource: Option<String>,
    pub action: Option<AuditAction>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub from: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub to: Option<i64>,
}
