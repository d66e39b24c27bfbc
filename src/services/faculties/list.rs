use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FacultyService;
use crate::models::{ApiResponse, faculties::requests::FacultyListQuery};

pub async fn list_faculties(
    service: &FacultyService,
    query: FacultyListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let page = storage.list_faculties_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Faculty list retrieved successfully",
    )))
}
