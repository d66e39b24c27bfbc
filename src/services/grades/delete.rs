use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::GradeService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::access::ensure_course_manager;

pub async fn delete_grade(
    service: &GradeService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    let grade = storage
        .get_grade_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Grade not found"))?;
    let enrollment = storage
        .get_enrollment_by_id(grade.enrollment_id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Enrollment not found"))?;
    let course = storage
        .get_course_by_id(enrollment.course_id, true)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Course not found"))?;
    ensure_course_manager(storage.as_ref(), &user, &course).await?;

    storage.delete_grade(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted successfully")))
}
