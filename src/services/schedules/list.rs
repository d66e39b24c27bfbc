use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::{ApiResponse, schedules::requests::ScheduleListQuery};

pub async fn list_schedules(
    service: &ScheduleService,
    query: ScheduleListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let page = storage.list_schedules_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Schedule list retrieved successfully",
    )))
}
