use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{
    ApiResponse, teachers::requests::CreateTeacherRequest, users::entities::UserRole,
};
use crate::services::references::{ensure_department_exists, ensure_user_with_role};
use crate::utils::validate::Validate;

pub async fn create_teacher(
    service: &TeacherService,
    req: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;

    if let Some(user_id) = req.user_id {
        ensure_user_with_role(storage.as_ref(), user_id, UserRole::Teacher).await?;
    }
    if let Some(department_id) = req.department_id {
        ensure_department_exists(storage.as_ref(), department_id).await?;
    }

    let teacher = storage.create_teacher(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        teacher,
        "Teacher created successfully",
    )))
}
