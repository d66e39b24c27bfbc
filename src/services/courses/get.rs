use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::CourseService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, IncludeDeletedQuery};

pub async fn get_course(
    service: &CourseService,
    id: Uuid,
    query: IncludeDeletedQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let include_deleted = user.role.is_staff() && query.include_deleted.unwrap_or(false);

    let storage = service.get_storage(request)?;
    let course = storage
        .get_course_by_id(id, include_deleted)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Course not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        course,
        "Course retrieved successfully",
    )))
}
