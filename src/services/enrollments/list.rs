use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, enrollments::requests::EnrollmentListQuery, users::entities::UserRole,
};
use crate::services::access::own_student_id;

pub async fn list_enrollments(
    service: &EnrollmentService,
    mut query: EnrollmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    // 学生只能看到自己的选课记录
    if user.role == UserRole::Student {
        query.student_id = Some(own_student_id(storage.as_ref(), &user).await?);
    }

    let page = storage.list_enrollments_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Enrollment list retrieved successfully",
    )))
}
