pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod records;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::IncludeDeletedQuery;
use crate::models::students::{
    entities::Student,
    requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
};
use crate::models::users::entities::User;
use crate::services::access::ensure_student_access;
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_students(
        &self,
        query: StudentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn get_student(
        &self,
        id: Uuid,
        query: IncludeDeletedQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, id, query, request).await
    }

    pub async fn create_student(
        &self,
        req: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, req, request).await
    }

    pub async fn update_student(
        &self,
        id: Uuid,
        req: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, req, request).await
    }

    pub async fn delete_student(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }

    pub async fn restore_student(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::restore_student(self, id, request).await
    }

    // 学生的选课记录
    pub async fn list_enrollments(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::list_enrollments(self, id, request).await
    }

    // 成绩单
    pub async fn get_transcript(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::get_transcript(self, id, request).await
    }

    // 考勤总览
    pub async fn get_attendance(
        &self,
        id: Uuid,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::get_attendance(self, id, request).await
    }
}

/// 加载未删除的学生，并检查当前用户是否有权访问
pub(crate) async fn load_accessible_student(
    storage: &dyn Storage,
    user: &User,
    id: Uuid,
) -> Result<Student> {
    ensure_student_access(storage, user, id).await?;
    storage
        .get_student_by_id(id, false)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Student not found"))
}
