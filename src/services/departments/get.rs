use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::DepartmentService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn get_department(
    service: &DepartmentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let department = storage
        .get_department_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Department not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        department,
        "Department retrieved successfully",
    )))
}
