/*!
 * 基于角色的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。当前用户不存在时返回 401，角色不匹配时返回 403。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::{RequireJWT, RequireRole};
 * use crate::models::users::entities::UserRole;
 *
 * web::scope("/api/v1/faculties")
 *     .wrap(RequireJWT)  // 先验证JWT
 *     .service(
 *         web::scope("")
 *             .wrap(RequireRole::new_any(UserRole::staff_roles()))  // 再验证角色
 *             .route("", web::post().to(create_faculty)),
 *     );
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::{
    middlewares::RequireJWT,
    models::{ErrorCode, users::entities::UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<UserRole>,
    require_all: bool, // true 表示必须与唯一指定角色一致，false 表示任一角色即可
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: &UserRole) -> Self {
        Self {
            required_roles: vec![*role],
            require_all: true,
        }
    }

    /// 创建需要任一角色的中间件
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| **r).collect(),
            require_all: false,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_roles: self.required_roles.clone(),
            require_all: self.require_all,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_roles: Vec<UserRole>,
    require_all: bool,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required_roles = self.required_roles.clone();
        let require_all = self.require_all;

        Box::pin(async move {
            let user_id = RequireJWT::extract_user_id(req.request());
            let user_role = RequireJWT::extract_user_role(req.request());

            match (user_id, user_role) {
                (Some(user_id), Some(user_role)) => {
                    let has_permission = if require_all {
                        required_roles.iter().all(|role| *role == user_role)
                    } else {
                        required_roles.contains(&user_role)
                    };

                    if has_permission {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for user {} (role: {}). Required roles: {:?}",
                            user_id, user_role, required_roles
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "You do not have permission to perform this action",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                _ => {
                    info!("Role check failed: no authenticated user on {}", req.path());
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{User, UserStatus};
    use actix_web::{App, HttpMessage, HttpResponse, dev::Service as _, test, web};
    use uuid::Uuid;

    fn user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            username: "someone".into(),
            email: "someone@school.edu".into(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            failed_login_attempts: 0,
            locked_until: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    async fn call_as(role: Option<UserRole>, guard: RequireRole) -> StatusCode {
        let app = test::init_service(
            App::new()
                .service(
                    web::scope("/guarded")
                        .wrap(guard)
                        .route("", web::get().to(HttpResponse::Ok)),
                )
                .wrap_fn(move |req, srv| {
                    if let Some(role) = role {
                        req.extensions_mut().insert(user(role));
                    }
                    srv.call(req)
                }),
        )
        .await;
        let req = test::TestRequest::get().uri("/guarded").to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_any_role_matching() {
        let staff = || RequireRole::new_any(UserRole::staff_roles());
        assert_eq!(call_as(Some(UserRole::Admin), staff()).await, StatusCode::OK);
        assert_eq!(call_as(Some(UserRole::Staff), staff()).await, StatusCode::OK);
        assert_eq!(
            call_as(Some(UserRole::Teacher), staff()).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(call_as(None, staff()).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_single_role() {
        let admin = || RequireRole::new(&UserRole::Admin);
        assert_eq!(call_as(Some(UserRole::Admin), admin()).await, StatusCode::OK);
        assert_eq!(
            call_as(Some(UserRole::Staff), admin()).await,
            StatusCode::FORBIDDEN
        );
    }
}
