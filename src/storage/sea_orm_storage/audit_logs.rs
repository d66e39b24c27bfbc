use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::audit_logs::{ActiveModel, Column, Entity as AuditLogs};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    audit_logs::{
        entities::{AuditLog, NewAuditLog},
        requests::AuditLogListQuery,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

impl SeaOrmStorage {
    pub async fn create_audit_log_impl(&self, log: NewAuditLog) -> Result<AuditLog> {
        let success = log.success();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(log.user_id),
            username: Set(log.username),
            action: Set(log.action.to_string()),
            resource: Set(log.resource),
            resource_id: Set(log.resource_id),
            method: Set(log.method),
            path: Set(log.path),
            status_code: Set(i32::from(log.status_code)),
            success: Set(success),
            ip_address: Set(log.ip_address),
            user_agent: Set(log.user_agent),
            created_at: Set(now_ts()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("写入审计日志失败"))?;

        Ok(result.into_audit_log())
    }

    pub async fn get_audit_log_by_id_impl(&self, id: Uuid) -> Result<Option<AuditLog>> {
        let result = AuditLogs::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询审计日志失败"))?;

        Ok(result.map(|m| m.into_audit_log()))
    }

    pub async fn list_audit_logs_with_pagination_impl(
        &self,
        query: AuditLogListQuery,
    ) -> Result<PaginatedResponse<AuditLog>> {
        let mut select = AuditLogs::find();

        if let Some(user_id) = query.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }
        if let Some(ref resource) = query.resource
            && !resource.trim().is_empty()
        {
            select = select.filter(Column::Resource.eq(resource.trim()));
        }
        if let Some(action) = query.action {
            select = select.filter(Column::Action.eq(action.to_string()));
        }
        if let Some(success) = query.success {
            select = select.filter(Column::Success.eq(success));
        }
        if let Some(from) = query.from {
            select = select.filter(Column::CreatedAt.gte(from));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::CreatedAt.lte(to));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let (items, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询审计日志失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_audit_log()).collect(),
            pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::storage;
    use super::*;
    use crate::models::audit_logs::entities::AuditAction;

    fn entry(action: AuditAction, status_code: u16) -> NewAuditLog {
        NewAuditLog {
            user_id: None,
            username: Some("admin".into()),
            action,
            resource: "students".into(),
            resource_id: None,
            method: "POST".into(),
            path: "/api/v1/students".into(),
            status_code,
            ip_address: Some("127.0.0.1".into()),
            user_agent: None,
        }
    }

    #[tokio::test]
    async fn test_success_flag_and_filters() {
        let storage = storage().await;
        let ok = storage
            .create_audit_log_impl(entry(AuditAction::Create, 201))
            .await
            .unwrap();
        assert!(ok.success);
        let failed = storage
            .create_audit_log_impl(entry(AuditAction::Delete, 409))
            .await
            .unwrap();
        assert!(!failed.success);

        let failures = storage
            .list_audit_logs_with_pagination_impl(AuditLogListQuery {
                success: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(failures.items.len(), 1);
        assert_eq!(failures.items[0].action, AuditAction::Delete);

        let creates = storage
            .list_audit_logs_with_pagination_impl(AuditLogListQuery {
                action: Some(AuditAction::Create),
                resource: Some("students".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(creates.items.len(), 1);

        let fetched = storage.get_audit_log_by_id_impl(ok.id).await.unwrap();
        assert_eq!(fetched.map(|l| l.status_code), Some(201));
    }
}
