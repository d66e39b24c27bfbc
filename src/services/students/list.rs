use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, students::requests::StudentListQuery};

pub async fn list_students(
    service: &StudentService,
    mut query: StudentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    if !user.role.is_staff() {
        query.include_deleted = None;
    }

    let storage = service.get_storage(request)?;
    let page = storage.list_students_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Student list retrieved successfully",
    )))
}
