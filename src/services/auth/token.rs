use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::auth::responses::{RefreshTokenResponse, UserInfoResponse};
use crate::models::{ApiResponse, ErrorCode, users::entities::UserStatus};
use crate::utils::jwt;

use super::AuthService;

fn unauthorized(message: &str) -> HttpResponse {
    // 清除无效的 refresh token cookie
    HttpResponse::Unauthorized()
        .cookie(jwt::JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let claims = match jwt::JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            return Ok(unauthorized("Login expired or invalid, please login again"));
        }
    };

    let Some(user_id) = claims.user_id() else {
        return Ok(unauthorized("Login expired or invalid, please login again"));
    };

    // 角色可能已变更，以存储中的用户为准
    let storage = service.get_storage(request)?;
    let user = match storage.get_user_by_id(user_id).await? {
        Some(user) if user.status == UserStatus::Active => user,
        _ => return Ok(unauthorized("Account is no longer available")),
    };

    let access_token = jwt::JwtUtils::generate_access_token(user.id, user.role.as_str())
        .map_err(|e| EduSystemError::internal(format!("Failed to generate token: {e}")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RefreshTokenResponse {
            access_token,
            expires_in: config.jwt.access_token_expiry * 60,
        },
        "Token refreshed successfully",
    )))
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse { user },
        "User information retrieved successfully",
    )))
}
