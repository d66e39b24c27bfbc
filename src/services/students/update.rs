use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::StudentService;
use crate::errors::EduSystemError;
use crate::models::{
    ApiResponse, students::requests::UpdateStudentRequest, users::entities::UserRole,
};
use crate::services::references::{ensure_department_exists, ensure_user_with_role};
use crate::utils::validate::Validate;

pub async fn update_student(
    service: &StudentService,
    id: Uuid,
    req: UpdateStudentRequest,
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

    let student = storage
        .update_student(id, req)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Student not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        student,
        "Student updated successfully",
    )))
}
