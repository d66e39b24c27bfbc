use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse, students::requests::CreateStudentRequest, users::entities::UserRole,
};
use crate::services::references::{ensure_department_exists, ensure_user_with_role};
use crate::utils::validate::Validate;

pub async fn create_student(
    service: &StudentService,
    req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;

    if let Some(user_id) = req.user_id {
        ensure_user_with_role(storage.as_ref(), user_id, UserRole::Student).await?;
    }
    if let Some(department_id) = req.department_id {
        ensure_department_exists(storage.as_ref(), department_id).await?;
    }

    let student = storage.create_student(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        student,
        "Student created successfully",
    )))
}
