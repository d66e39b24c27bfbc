/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>` 中的 access token，
 * 通过后把当前用户写入请求扩展，后续的 `RequireRole` 与服务层都从扩展中读取。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireJWT;
 *
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_students));
 *
 * async fn handler(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let user = RequireJWT::current_user(&req)?;
 *     // ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 提取并校验 access token（签名、过期时间、token 类型）
 * 2. 按 `user:{id}` 查询缓存，未命中时从存储加载
 * 3. 用户必须处于 active 状态，否则返回 401
 * 4. 用户写入缓存与请求扩展，继续处理请求
 *
 * 用户被修改或删除时，用户服务会清除对应的缓存键。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::errors::{EduSystemError, Result};
use crate::models::users::entities::{User, UserRole, UserStatus};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse, ResponseError,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct RequireJWT;

/// 已认证用户的缓存键
pub fn user_cache_key(user_id: Uuid) -> String {
    format!("user:{user_id}")
}

// 辅助函数：提取并验证 JWT access token，返回当前用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User> {
    let token = JwtUtils::extract_bearer_token(req.request())
        .ok_or_else(|| EduSystemError::authentication("Missing or invalid Authorization header"))?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        EduSystemError::authentication("Invalid or expired token")
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| EduSystemError::authentication("Invalid user ID in token"))?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());
    let cache_key = user_cache_key(user_id);

    // 从缓存中获取用户信息
    if let Some(cache) = &cache {
        match cache.get_raw(&cache_key).await {
            CacheResult::Found(json) => match serde_json::from_str::<User>(&json) {
                Ok(user) => return Ok(user),
                Err(_) => {
                    cache.remove(&cache_key).await;
                    debug!("Dropping undecodable cache entry {}", cache_key);
                }
            },
            CacheResult::NotFound | CacheResult::ExistsButNoValue => {
                debug!("User {} not found in cache", user_id);
            }
        }
    }

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| EduSystemError::internal("Storage not found in app data"))?
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| EduSystemError::authentication("User not found"))?;

    if user.status != UserStatus::Active {
        return Err(EduSystemError::authentication("User is not active"));
    }

    if let Some(cache) = &cache
        && let Ok(user_json) = serde_json::to_string(&user)
    {
        cache
            .insert_raw(cache_key, user_json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(err.error_response().map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_user_claims(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<Uuid> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role)
    }

    /// 当前用户，不存在时返回 401
    pub fn current_user(req: &HttpRequest) -> Result<User> {
        Self::extract_user_claims(req)
            .ok_or_else(|| EduSystemError::authentication("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest};
    use crate::storage::sea_orm_storage::test_support;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    async fn whoami(req: HttpRequest) -> actix_web::Result<HttpResponse> {
        let user = RequireJWT::current_user(&req)?;
        Ok(HttpResponse::Ok().body(user.username))
    }

    async fn setup() -> (Arc<dyn Storage>, User) {
        let storage: Arc<dyn Storage> = Arc::new(test_support::storage().await);
        let user = storage
            .create_user(CreateUserRequest {
                username: "teacher1".into(),
                email: "teacher1@school.edu".into(),
                password: "hash".into(),
                role: UserRole::Teacher,
                display_name: None,
            })
            .await
            .unwrap();
        (storage, user)
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let (storage, user) = setup().await;
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new().unwrap());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache.clone()))
                .service(web::scope("/me").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let pair = user.generate_token_pair(None).unwrap();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "teacher1");

        assert!(matches!(
            cache.get_raw(&user_cache_key(user.id)).await,
            CacheResult::Found(_)
        ));
    }

    #[actix_web::test]
    async fn test_missing_and_refresh_tokens_rejected() {
        let (storage, user) = setup().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .service(web::scope("/me").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let pair = user.generate_token_pair(None).unwrap();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_inactive_user_rejected() {
        let (storage, user) = setup().await;
        storage
            .update_user(
                user.id,
                UpdateUserRequest {
                    status: Some(UserStatus::Suspended),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .service(web::scope("/me").wrap(RequireJWT).route("", web::get().to(whoami))),
        )
        .await;

        let pair = user.generate_token_pair(None).unwrap();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
