use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::GradeService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::access::ensure_student_access;

pub async fn get_grade(
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
    ensure_student_access(storage.as_ref(), &user, enrollment.student_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        grade,
        "Grade retrieved successfully",
    )))
}
