pub mod conflict;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::courses::entities::Course;
use crate::models::schedules::requests::{
    CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest,
};
use crate::storage::Storage;

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_schedules(
        &self,
        query: ScheduleListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, query, request).await
    }

    pub async fn get_schedule(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_schedule(self, id, request).await
    }

    pub async fn create_schedule(
        &self,
        req: CreateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, req, request).await
    }

    pub async fn update_schedule(
        &self,
        id: Uuid,
        req: UpdateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_schedule(self, id, req, request).await
    }

    pub async fn delete_schedule(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, id, request).await
    }
}

/// 课表引用的课程必须存在且未删除，学期必须存在
async fn check_references(storage: &dyn Storage, course_id: Uuid, term_id: Uuid) -> Result<Course> {
    let course = storage
        .get_course_by_id(course_id, false)
        .await?
        .ok_or_else(|| EduSystemError::validation("course_id does not exist"))?;
    if storage.get_term_by_id(term_id).await?.is_none() {
        return Err(EduSystemError::validation("term_id does not exist"));
    }
    Ok(course)
}
