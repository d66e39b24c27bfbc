use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::ScheduleService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn delete_schedule(
    service: &ScheduleService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if !storage.delete_schedule(id).await? {
        return Err(EduSystemError::not_found("Schedule not found").into());
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Schedule deleted successfully")))
}
