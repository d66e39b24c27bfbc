use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{CourseService, check_references};
use crate::errors::EduSystemError;
use crate::models::{ApiResponse, courses::requests::UpdateCourseRequest};
use crate::utils::validate::Validate;

pub async fn update_course(
    service: &CourseService,
    id: Uuid,
    req: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;
    check_references(storage.as_ref(), req.department_id, req.teacher_id).await?;

    let course = storage
        .update_course(id, req)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Course not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        course,
        "Course updated successfully",
    )))
}
