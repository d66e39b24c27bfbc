//! 审计日志实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<Uuid>,
    pub method: String,
    pub path: String,
    pub status_code: i32,
    pub success: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_audit_log(self) -> crate::models::audit_logs::entities::AuditLog {
        use super::to_datetime;
        use crate::models::audit_logs::entities::{AuditAction, AuditLog};

        AuditLog {
            id: self.id,
            user_id: self.user_id,
            username: self.username,
            action: self
                .action
                .parse::<AuditAction>()
                .unwrap_or(AuditAction::Update),
            resource: self.resource,
            resource_id: self.resource_id,
            method: self.method,
            path: self.path,
            status_code: self.status_code,
            success: self.success,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            created_at: to_datetime(self.created_at),
        }
    }
}
