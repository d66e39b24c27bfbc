use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::{ApiResponse, audit_logs::requests::AuditLogListQuery};
use crate::storage::Storage;

pub struct AuditLogService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuditLogService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 按时间倒序分页
    pub async fn list_audit_logs(
        &self,
        query: AuditLogListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let (Some(from), Some(to)) = (query.from, query.to)
            && from > to
        {
            return Err(EduSystemError::validation("from must not be later than to").into());
        }

        let storage = self.get_storage(request)?;
        let page = storage.list_audit_logs_with_pagination(query).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::paginated(
            page,
            "Audit log list retrieved successfully",
        )))
    }

    pub async fn get_audit_log(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let log = storage
            .get_audit_log_by_id(id)
            .await?
            .ok_or_else(|| EduSystemError::not_found("Audit log not found"))?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            log,
            "Audit log retrieved successfully",
        )))
    }
}
