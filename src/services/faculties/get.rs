use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::FacultyService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn get_faculty(
    service: &FacultyService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let faculty = storage
        .get_faculty_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Faculty not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        faculty,
        "Faculty retrieved successfully",
    )))
}
