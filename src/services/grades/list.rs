use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, grades::requests::GradeListQuery, users::entities::UserRole};
use crate::services::access::own_student_id;

pub async fn list_grades(
    service: &GradeService,
    mut query: GradeListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    // 学生只能查看自己的成绩
    if user.role == UserRole::Student {
        query.student_id = Some(own_student_id(storage.as_ref(), &user).await?);
    }

    let page = storage.list_grades_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Grade list retrieved successfully",
    )))
}
