use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{DepartmentService, check_references};
use crate::errors::EduSystemError;
use crate::models::{ApiResponse, departments::requests::UpdateDepartmentRequest};
use crate::utils::validate::Validate;

pub async fn update_department(
    service: &DepartmentService,
    id: Uuid,
    req: UpdateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;
    check_references(storage.as_ref(), req.faculty_id, req.head_teacher_id).await?;

    let department = storage
        .update_department(id, req)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Department not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        department,
        "Department updated successfully",
    )))
}
