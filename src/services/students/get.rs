use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::StudentService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, IncludeDeletedQuery};
use crate::services::access::ensure_student_access;

pub async fn get_student(
    service: &StudentService,
    id: Uuid,
    query: IncludeDeletedQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;
    ensure_student_access(storage.as_ref(), &user, id).await?;

    let include_deleted = user.role.is_staff() && query.include_deleted.unwrap_or(false);
    let student = storage
        .get_student_by_id(id, include_deleted)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Student not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        student,
        "Student retrieved successfully",
    )))
}
