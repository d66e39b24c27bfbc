use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::TeacherService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, IncludeDeletedQuery};

pub async fn get_teacher(
    service: &TeacherService,
    id: Uuid,
    query: IncludeDeletedQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let include_deleted = user.role.is_staff() && query.include_deleted.unwrap_or(false);

    let storage = service.get_storage(request)?;
    let teacher = storage
        .get_teacher_by_id(id, include_deleted)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Teacher not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        teacher,
        "Teacher retrieved successfully",
    )))
}
