pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::faculties::requests::{
    CreateFacultyRequest, FacultyListQuery, UpdateFacultyRequest,
};
use crate::storage::Storage;

pub struct FacultyService {
    storage: Option<Arc<dyn Storage>>,
}

impl FacultyService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_faculties(
        &self,
        query: FacultyListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_faculties(self, query, request).await
    }

    pub async fn get_faculty(&self, id: Uuid, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_faculty(self, id, request).await
    }

    pub async fn create_faculty(
        &self,
        req: CreateFacultyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_faculty(self, req, request).await
    }

    pub async fn update_faculty(
        &self,
        id: Uuid,
        req: UpdateFacultyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_faculty(self, id, req, request).await
    }

    // 仍有院系引用时拒绝删除
    pub async fn delete_faculty(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_faculty(self, id, request).await
    }
}
