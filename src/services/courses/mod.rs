pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod roster;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::IncludeDeletedQuery;
use crate::models::courses::requests::{
    CourseListQuery, CourseStudentsQuery, CreateCourseRequest, UpdateCourseRequest,
};
use crate::services::references::{ensure_active_teacher, ensure_department_exists};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_courses(
        &self,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    pub async fn get_course(
        &self,
        id: Uuid,
        query: IncludeDeletedQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, id, query, request).await
    }

    pub async fn create_course(
        &self,
        req: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, req, request).await
    }

    pub async fn update_course(
        &self,
        id: Uuid,
        req: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, id, req, request).await
    }

    pub async fn delete_course(&self, id: Uuid, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_course(self, id, request).await
    }

    pub async fn restore_course(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::restore_course(self, id, request).await
    }

    // 课程名单
    pub async fn list_course_students(
        &self,
        id: Uuid,
        query: CourseStudentsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        roster::list_course_students(self, id, query, request).await
    }
}

async fn check_references(
    storage: &dyn Storage,
    department_id: Option<Uuid>,
    teacher_id: Option<Uuid>,
) -> Result<()> {
    if let Some(department_id) = department_id {
        ensure_department_exists(storage, department_id).await?;
    }
    if let Some(teacher_id) = teacher_id {
        ensure_active_teacher(storage, teacher_id).await?;
    }
    Ok(())
}
