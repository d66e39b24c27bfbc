pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::enrollments::{
    entities::Enrollment,
    requests::{CreateEnrollmentRequest, EnrollmentListQuery},
};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_enrollment(
        &self,
        req: CreateEnrollmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_enrollment(self, req, request).await
    }

    pub async fn list_enrollments(
        &self,
        query: EnrollmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, query, request).await
    }

    pub async fn get_enrollment(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_enrollment(self, id, request).await
    }

    // 退课
    pub async fn drop_enrollment(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        status::drop_enrollment(self, id, request).await
    }

    // 结课
    pub async fn complete_enrollment(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        status::complete_enrollment(self, id, request).await
    }

    pub async fn delete_enrollment(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_enrollment(self, id, request).await
    }
}

pub(crate) async fn load_enrollment(storage: &dyn Storage, id: Uuid) -> Result<Enrollment> {
    storage
        .get_enrollment_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Enrollment not found"))
}
