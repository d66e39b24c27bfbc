use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::CourseService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, courses::requests::CourseStudentsQuery};
use crate::services::access::ensure_course_manager;

pub async fn list_course_students(
    service: &CourseService,
    id: Uuid,
    query: CourseStudentsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    let course = storage
        .get_course_by_id(id, false)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Course not found"))?;
    ensure_course_manager(storage.as_ref(), &user, &course).await?;

    let roster = storage.list_course_roster(course.id, query.term_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        roster,
        "Course roster retrieved successfully",
    )))
}
