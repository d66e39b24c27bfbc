use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::UserService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn get_user(
    service: &UserService,
    user_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User retrieved successfully")))
}
