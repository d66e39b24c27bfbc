use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, courses::requests::CourseListQuery};

pub async fn list_courses(
    service: &CourseService,
    mut query: CourseListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    if !user.role.is_staff() {
        query.include_deleted = None;
    }

    let storage = service.get_storage(request)?;
    let page = storage.list_courses_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Course list retrieved successfully",
    )))
}
