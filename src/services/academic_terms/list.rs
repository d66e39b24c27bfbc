use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AcademicTermService;
use crate::models::{ApiResponse, academic_terms::requests::AcademicTermListQuery};

pub async fn list_terms(
    service: &AcademicTermService,
    query: AcademicTermListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let page = storage.list_terms_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Academic term list retrieved successfully",
    )))
}
