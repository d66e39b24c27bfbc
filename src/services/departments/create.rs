use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DepartmentService, check_references};
use crate::models::{ApiResponse, departments::requests::CreateDepartmentRequest};
use crate::utils::validate::Validate;

pub async fn create_department(
    service: &DepartmentService,
    req: CreateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;
    check_references(storage.as_ref(), Some(req.faculty_id), req.head_teacher_id).await?;

    let department = storage.create_department(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        department,
        "Department created successfully",
    )))
}
