use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::models::{ApiResponse, faculties::requests::CreateFacultyRequest};
use crate::utils::validate::Validate;

pub async fn create_faculty(
    service: &FacultyService,
    req: CreateFacultyRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;
    let faculty = storage.create_faculty(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        faculty,
        "Faculty created successfully",
    )))
}
