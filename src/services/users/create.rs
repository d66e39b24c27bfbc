use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{ApiResponse, users::requests::CreateUserRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::Validate;

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    user_data.validate()?;
    user_data.password = hash_password(&user_data.password)?;

    let storage = service.get_storage(request)?;
    let user = storage.create_user(user_data).await?;

    info!("User {} created with role {}", user.username, user.role);
    Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
}
