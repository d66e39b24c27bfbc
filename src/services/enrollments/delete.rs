use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::EnrollmentService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn delete_enrollment(
    service: &EnrollmentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if !storage.delete_enrollment(id).await? {
        return Err(EduSystemError::not_found("Enrollment not found").into());
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Enrollment deleted successfully",
    )))
}
