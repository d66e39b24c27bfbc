use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;
use uuid::Uuid;

use super::AcademicTermService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn activate_term(
    service: &AcademicTermService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let term = storage
        .activate_term(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Academic term not found"))?;

    info!("Academic term {} is now current", term.code);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        term,
        "Academic term activated successfully",
    )))
}
