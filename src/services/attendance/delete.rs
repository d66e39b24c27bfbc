use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{AttendanceService, managed_record};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;

pub async fn delete_attendance(
    service: &AttendanceService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;
    managed_record(storage.as_ref(), &user, id).await?;

    storage.delete_attendance(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Attendance record deleted successfully",
    )))
}
