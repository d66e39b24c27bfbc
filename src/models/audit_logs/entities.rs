use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::define_string_enum;

define_string_enum! {
    pub enum AuditAction("audit action") {
        Create => "CREATE",
        Update => "UPDATE",
        Delete => "DELETE",
        Restore => "RESTORE",
        Activate => "ACTIVATE",
        Drop => "DROP",
        Complete => "COMPLETE",
        BulkCreate => "BULK_CREATE",
        Login => "LOGIN",
        Logout => "LOGOUT",
        ChangePassword => "CHANGE_PASSWORD",
    }
}

const API_PREFIX: &str = "/api/v1/";

impl AuditAction {
    /// 根据请求方法和路径推断审计动作，非变更请求返回 None
    pub fn from_request(method: &str, path: &str) -> Option<Self> {
        let base = match method {
            "POST" => AuditAction::Create,
            "PUT" | "PATCH" => AuditAction::Update,
            "DELETE" => AuditAction::Delete,
            _ => return None,
        };

        let path = path.trim_end_matches('/');
        let action = if path.ends_with("/auth/login") {
            AuditAction::Login
        } else if path.ends_with("/auth/logout") {
            AuditAction::Logout
        } else if path.ends_with("/auth/password") {
            AuditAction::ChangePassword
        } else if path.ends_with("/restore") {
            AuditAction::Restore
        } else if path.ends_with("/activate") {
            AuditAction::Activate
        } else if path.ends_with("/drop") {
            AuditAction::Drop
        } else if path.ends_with("/complete") {
            AuditAction::Complete
        } else if path.ends_with("/bulk") {
            AuditAction::BulkCreate
        } else {
            base
        };
        Some(action)
    }
}

/// 从 `/api/v1/<resource>/<id>/...` 中提取资源名和资源 ID
pub fn parse_audit_target(path: &str) -> Option<(String, Option<Uuid>)> {
    let rest = path.strip_prefix(API_PREFIX)?;
    let mut segments = rest.split('/').filter(|s| !s.is_empty());
    let resource = segments.next()?.to_string();
    let resource_id = segments.next().and_then(|s| Uuid::parse_str(s).ok());
    Some((resource, resource_id))
}

// 审计日志
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
    pub action: AuditAction,
    pub resource: String,
    pub resource_id: Option<Uuid>,
    pub method: String,
    pub path: String,
    pub status_code: i32,
    pub success: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 待写入的审计记录
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
    pub action: AuditAction,
    pub resource: String,
    pub resource_id: Option<Uuid>,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl NewAuditLog {
    pub fn success(&self) -> bool {
        self.status_code < 400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_mapping() {
        assert_eq!(
            AuditAction::from_request("POST", "/api/v1/students"),
            Some(AuditAction::Create)
        );
        assert_eq!(
            AuditAction::from_request("PUT", "/api/v1/students/abc"),
            Some(AuditAction::Update)
        );
        assert_eq!(
            AuditAction::from_request("PATCH", "/api/v1/courses/abc"),
            Some(AuditAction::Update)
        );
        assert_eq!(
            AuditAction::from_request("DELETE", "/api/v1/courses/abc"),
            Some(AuditAction::Delete)
        );
        assert_eq!(AuditAction::from_request("GET", "/api/v1/courses"), None);
    }

    #[test]
    fn test_special_suffixes() {
        assert_eq!(
            AuditAction::from_request("POST", "/api/v1/students/abc/restore"),
            Some(AuditAction::Restore)
        );
        assert_eq!(
            AuditAction::from_request("POST", "/api/v1/academic-terms/abc/activate"),
            Some(AuditAction::Activate)
        );
        assert_eq!(
            AuditAction::from_request("PUT", "/api/v1/enrollments/abc/drop"),
            Some(AuditAction::Drop)
        );
        assert_eq!(
            AuditAction::from_request("PUT", "/api/v1/enrollments/abc/complete"),
            Some(AuditAction::Complete)
        );
        assert_eq!(
            AuditAction::from_request("POST", "/api/v1/attendance/bulk"),
            Some(AuditAction::BulkCreate)
        );
        assert_eq!(
            AuditAction::from_request("POST", "/api/v1/auth/login"),
            Some(AuditAction::Login)
        );
        assert_eq!(
            AuditAction::from_request("PUT", "/api/v1/auth/password"),
            Some(AuditAction::ChangePassword)
        );
    }

    #[test]
    fn test_target_parsing() {
        let id = Uuid::new_v4();
        assert_eq!(
            parse_audit_target(&format!("/api/v1/students/{id}/restore")),
            Some(("students".to_string(), Some(id)))
        );
        assert_eq!(
            parse_audit_target("/api/v1/attendance/bulk"),
            Some(("attendance".to_string(), None))
        );
        assert_eq!(parse_audit_target("/health"), None);
    }
}
