use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{AttendanceService, managed_record};
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, attendance::requests::UpdateAttendanceRequest};
use crate::utils::validate::Validate;

pub async fn update_attendance(
    service: &AttendanceService,
    id: Uuid,
    req: UpdateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;
    managed_record(storage.as_ref(), &user, id).await?;

    let record = storage
        .update_attendance(id, req)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Attendance record not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        record,
        "Attendance record updated successfully",
    )))
}
