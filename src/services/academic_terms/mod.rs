pub mod activate;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::academic_terms::requests::{
    AcademicTermListQuery, CreateAcademicTermRequest, UpdateAcademicTermRequest,
};
use crate::storage::Storage;

pub struct AcademicTermService {
    storage: Option<Arc<dyn Storage>>,
}

impl AcademicTermService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_terms(
        &self,
        query: AcademicTermListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_terms(self, query, request).await
    }

    pub async fn get_term(&self, id: Uuid, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_term(self, id, request).await
    }

    // 当前学期
    pub async fn get_current_term(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_current_term(self, request).await
    }

    pub async fn create_term(
        &self,
        req: CreateAcademicTermRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_term(self, req, request).await
    }

    pub async fn update_term(
        &self,
        id: Uuid,
        req: UpdateAcademicTermRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_term(self, id, req, request).await
    }

    pub async fn delete_term(&self, id: Uuid, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_term(self, id, request).await
    }

    // 设为当前学期
    pub async fn activate_term(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        activate::activate_term(self, id, request).await
    }
}

/// 学期日期不能与其他学期重叠（闭区间）
pub(crate) async fn ensure_no_overlap(
    storage: &dyn Storage,
    start: NaiveDate,
    end: NaiveDate,
    exclude_id: Option<Uuid>,
) -> Result<()> {
    match storage.find_overlapping_term(start, end, exclude_id).await? {
        Some(existing) => Err(EduSystemError::conflict(format!(
            "Term dates overlap with term {} ({} to {})",
            existing.code, existing.start_date, existing.end_date
        ))),
        None => Ok(()),
    }
}
