pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::enrollments::entities::Enrollment;
use crate::models::grades::requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest};
use crate::models::users::entities::User;
use crate::services::access::ensure_course_manager;
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_grades(
        &self,
        query: GradeListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, query, request).await
    }

    pub async fn get_grade(&self, id: Uuid, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_grade(self, id, request).await
    }

    pub async fn create_grade(
        &self,
        req: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, req, request).await
    }

    pub async fn update_grade(
        &self,
        id: Uuid,
        req: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, id, req, request).await
    }

    pub async fn delete_grade(&self, id: Uuid, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, id, request).await
    }
}

/// 加载选课记录并确认当前用户可以为该课程登记成绩
async fn gradable_enrollment(
    storage: &dyn Storage,
    user: &User,
    enrollment_id: Uuid,
) -> Result<Enrollment> {
    let enrollment = storage
        .get_enrollment_by_id(enrollment_id)
        .await?
        .ok_or_else(|| EduSystemError::validation("enrollment_id does not exist"))?;

    let course = storage
        .get_course_by_id(enrollment.course_id, true)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Course not found"))?;
    ensure_course_manager(storage, user, &course).await?;

    if !enrollment.status.is_active() {
        return Err(EduSystemError::conflict(
            "Grades cannot be recorded for a dropped enrollment",
        ));
    }
    Ok(enrollment)
}
