use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, attendance::requests::AttendanceListQuery};

pub async fn list_attendance(
    service: &AttendanceService,
    query: AttendanceListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let page = storage.list_attendance_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page,
        "Attendance list retrieved successfully",
    )))
}
