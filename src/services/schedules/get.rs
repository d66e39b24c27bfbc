use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ScheduleService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn get_schedule(
    service: &ScheduleService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let schedule = storage
        .get_schedule_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Schedule not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        schedule,
        "Schedule retrieved successfully",
    )))
}
