use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::CourseService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn delete_course(
    service: &CourseService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if !storage.soft_delete_course(id).await? {
        return Err(EduSystemError::not_found("Course not found").into());
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
}

pub async fn restore_course(
    service: &CourseService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let course = storage
        .get_course_by_id(id, true)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Course not found"))?;
    if !course.is_deleted() {
        return Err(EduSystemError::conflict("Course is not deleted").into());
    }

    storage.restore_course(id).await?;
    let restored = storage
        .get_course_by_id(id, false)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Course not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        restored,
        "Course restored successfully",
    )))
}
