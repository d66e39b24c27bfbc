use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, teachers::requests::TeacherListQuery};

pub async fn list_teachers(
    service: &TeacherService,
    mut query: TeacherListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    // 已删除的记录只对管理员和教务人员可见
    if !user.role.is_staff() {
        query.include_deleted = None;
    }

    let storage = service.get_storage(request)?;
    let page = storage.list_teachers_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Teacher list retrieved successfully",
    )))
}
