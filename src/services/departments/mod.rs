pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest,
};
use crate::storage::Storage;

pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DepartmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_departments(
        &self,
        query: DepartmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_departments(self, query, request).await
    }

    pub async fn get_department(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_department(self, id, request).await
    }

    pub async fn create_department(
        &self,
        req: CreateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, req, request).await
    }

    pub async fn update_department(
        &self,
        id: Uuid,
        req: UpdateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, id, req, request).await
    }

    pub async fn delete_department(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, id, request).await
    }
}

/// 引用的学院与系主任必须存在
pub(crate) async fn check_references(
    storage: &dyn Storage,
    faculty_id: Option<Uuid>,
    head_teacher_id: Option<Uuid>,
) -> Result<()> {
    if let Some(faculty_id) = faculty_id
        && storage.get_faculty_by_id(faculty_id).await?.is_none()
    {
        return Err(EduSystemError::validation("faculty_id does not exist"));
    }
    if let Some(teacher_id) = head_teacher_id
        && storage.get_teacher_by_id(teacher_id, false).await?.is_none()
    {
        return Err(EduSystemError::validation("head_teacher_id does not exist"));
    }
    Ok(())
}
