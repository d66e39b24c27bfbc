use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{EnrollmentService, load_enrollment};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::access::ensure_student_access;

pub async fn get_enrollment(
    service: &EnrollmentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    let enrollment = load_enrollment(storage.as_ref(), id).await?;
    ensure_student_access(storage.as_ref(), &user, enrollment.student_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        enrollment,
        "Enrollment retrieved successfully",
    )))
}
