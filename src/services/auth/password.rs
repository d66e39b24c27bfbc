use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::services::invalidate_user_cache;
use crate::models::{
    ApiResponse, auth::ChangePasswordRequest, users::requests::UpdateUserRequest,
};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::Validate;

use super::AuthService;

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current = RequireJWT::current_user(request)?;
    change_request.validate()?;

    // 缓存中的用户不含密码哈希，从存储重新加载
    let storage = service.get_storage(request)?;
    let user = storage
        .get_user_by_id(current.id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("User not found"))?;

    if !verify_password(&change_request.current_password, &user.password_hash) {
        return Err(EduSystemError::validation("Current password is incorrect").into());
    }

    let password_hash = hash_password(&change_request.new_password)?;
    storage
        .update_user(
            user.id,
            UpdateUserRequest {
                password: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;

    invalidate_user_cache(request, user.id).await;

    info!("User {} changed password", user.username);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed successfully")))
}
