use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::FacultyService;
use crate::errors::EduSystemError;
use crate::models::{ApiResponse, faculties::requests::UpdateFacultyRequest};
use crate::utils::validate::Validate;

pub async fn update_faculty(
    service: &FacultyService,
    id: Uuid,
    req: UpdateFacultyRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;
    let faculty = storage
        .update_faculty(id, req)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Faculty not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        faculty,
        "Faculty updated successfully",
    )))
}
