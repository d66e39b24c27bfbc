use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, check_references};
use crate::models::{ApiResponse, courses::requests::CreateCourseRequest};
use crate::utils::validate::Validate;

pub async fn create_course(
    service: &CourseService,
    req: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;
    check_references(storage.as_ref(), req.department_id, req.teacher_id).await?;

    let course = storage.create_course(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        course,
        "Course created successfully",
    )))
}
