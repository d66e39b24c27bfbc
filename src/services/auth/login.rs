use actix_web::{HttpMessage, HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::errors::EduSystemError;
use crate::models::{
    ApiResponse,
    auth::{LoginRequest, LoginResponse},
    users::entities::UserStatus,
};
use crate::utils::jwt;
use crate::utils::password::verify_password;
use crate::utils::validate::Validate;

use super::AuthService;

const INVALID_CREDENTIALS: &str = "Username or password is incorrect";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    login_request.validate()?;

    let storage = service.get_storage(request)?;
    let config = service.get_config();
    let now = chrono::Utc::now();

    // 1. 根据用户名或邮箱获取用户信息
    let Some(mut user) = storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await?
    else {
        return Err(EduSystemError::authentication(INVALID_CREDENTIALS).into());
    };

    // 2. 锁定期内不校验密码
    if let Some(until) = user.locked_until.filter(|until| *until > now) {
        info!("Login attempt for locked account {}", user.username);
        return Err(EduSystemError::account_locked(format!(
            "Account is locked until {}",
            until.to_rfc3339()
        ))
        .into());
    }

    // 3. 验证密码，失败时累加计数
    if !verify_password(&login_request.password, &user.password_hash) {
        let locked_until = storage
            .record_login_failure(
                user.id,
                config.security.max_login_attempts,
                config.security.lockout_minutes,
            )
            .await?;

        return Err(match locked_until {
            Some(until) => {
                warn!(
                    "Account {} locked after too many failed login attempts",
                    user.username
                );
                EduSystemError::account_locked(format!(
                    "Too many failed login attempts, account is locked until {}",
                    until.to_rfc3339()
                ))
            }
            None => EduSystemError::authentication(INVALID_CREDENTIALS),
        }
        .into());
    }

    // 4. 停用或暂停的账号不允许登录
    if user.status != UserStatus::Active {
        return Err(EduSystemError::authorization(format!(
            "Account is {}, please contact the administrator",
            user.status
        ))
        .into());
    }

    // 5. 清零失败计数并记录登录时间
    storage.record_login_success(user.id).await?;
    user.last_login = Some(now);
    user.failed_login_attempts = 0;
    user.locked_until = None;

    // 6. 生成令牌对
    let refresh_days = if login_request.remember_me {
        config.jwt.refresh_token_remember_me_expiry
    } else {
        config.jwt.refresh_token_expiry
    };
    let token_pair = user
        .generate_token_pair(Some(chrono::Duration::days(refresh_days)))
        .map_err(|e| {
            EduSystemError::internal(format!("Login failed, unable to generate token: {e}"))
        })?;

    info!("User {} logged in successfully", user.username);

    // 登录接口没有经过 RequireJWT，审计中间件从这里读取用户
    request.extensions_mut().insert(user.clone());

    let refresh_cookie =
        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_days);

    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
        user,
        created_at: now,
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
