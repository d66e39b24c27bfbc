pub mod bulk;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceSummaryQuery, BulkAttendanceRequest, CreateAttendanceRequest,
    UpdateAttendanceRequest,
};
use crate::models::courses::entities::Course;
use crate::models::users::entities::User;
use crate::services::access::ensure_course_manager;
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_attendance(
        &self,
        req: CreateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_attendance(self, req, request).await
    }

    // 按课程与日期批量登记
    pub async fn bulk_create_attendance(
        &self,
        req: BulkAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::bulk_create_attendance(self, req, request).await
    }

    pub async fn list_attendance(
        &self,
        query: AttendanceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, query, request).await
    }

    pub async fn get_attendance(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_attendance(self, id, request).await
    }

    pub async fn update_attendance(
        &self,
        id: Uuid,
        req: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, id, req, request).await
    }

    pub async fn delete_attendance(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, id, request).await
    }

    pub async fn get_summary(
        &self,
        query: AttendanceSummaryQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::get_summary(self, query, request).await
    }
}

/// 加载课程并确认当前用户可以为其登记考勤
async fn managed_course(storage: &dyn Storage, user: &User, course_id: Uuid) -> Result<Course> {
    let course = storage
        .get_course_by_id(course_id, false)
        .await?
        .ok_or_else(|| EduSystemError::validation("course_id does not exist"))?;
    ensure_course_manager(storage, user, &course).await?;
    Ok(course)
}

async fn ensure_enrolled(storage: &dyn Storage, student_id: Uuid, course_id: Uuid) -> Result<()> {
    if storage
        .has_active_enrollment_in_course(student_id, course_id)
        .await?
    {
        Ok(())
    } else {
        Err(EduSystemError::validation(
            "Student is not enrolled in this course",
        ))
    }
}

/// 已有考勤记录：加载后检查课程管理权限
async fn managed_record(
    storage: &dyn Storage,
    user: &User,
    id: Uuid,
) -> Result<crate::models::attendance::entities::AttendanceRecord> {
    let record = storage
        .get_attendance_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Attendance record not found"))?;
    let course = storage
        .get_course_by_id(record.course_id, true)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Course not found"))?;
    ensure_course_manager(storage, user, &course).await?;
    Ok(record)
}
