use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, departments::requests::DepartmentListQuery};

pub async fn list_departments(
    service: &DepartmentService,
    query: DepartmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let page = storage.list_departments_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Department list retrieved successfully",
    )))
}
