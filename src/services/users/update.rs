use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::UserService;
use crate::errors::EduSystemError;
use crate::models::{ApiResponse, users::requests::UpdateUserRequest};
use crate::services::invalidate_user_cache;
use crate::utils::password::hash_password;
use crate::utils::validate::Validate;

pub async fn update_user(
    service: &UserService,
    user_id: Uuid,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update_data.validate()?;

    if let Some(password) = update_data.password.take() {
        update_data.password = Some(hash_password(&password)?);
    }

    let storage = service.get_storage(request)?;
    let user = storage
        .update_user(user_id, update_data)
        .await?
        .ok_or_else(|| EduSystemError::not_found("User not found"))?;

    // 角色或状态可能已变化
    invalidate_user_cache(request, user_id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated successfully")))
}
