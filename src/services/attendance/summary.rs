use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    attendance::{entities::AttendanceSummary, requests::AttendanceSummaryQuery},
};
use crate::services::access::ensure_student_access;

pub async fn get_summary(
    service: &AttendanceService,
    query: AttendanceSummaryQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;
    ensure_student_access(storage.as_ref(), &user, query.student_id).await?;

    if storage
        .get_student_by_id(query.student_id, false)
        .await?
        .is_none()
    {
        return Err(EduSystemError::not_found("Student not found").into());
    }

    let records = storage
        .list_attendance_for_student(query.student_id, query.course_id)
        .await?;
    let summary = AttendanceSummary::from_records(query.student_id, query.course_id, &records);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summary,
        "Attendance summary retrieved successfully",
    )))
}
