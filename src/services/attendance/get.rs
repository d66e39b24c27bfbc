use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::AttendanceService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::access::ensure_student_access;

pub async fn get_attendance(
    service: &AttendanceService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    let record = storage
        .get_attendance_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Attendance record not found"))?;
    ensure_student_access(storage.as_ref(), &user, record.student_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        record,
        "Attendance record retrieved successfully",
    )))
}
