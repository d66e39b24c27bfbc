/*!
 * 审计日志中间件
 *
 * 在应用层包裹所有路由，记录 `/api/v1/` 下的变更请求（POST、PUT、PATCH、DELETE）。
 * 响应生成后再写入日志，因此能拿到最终状态码以及 RequireJWT 写入扩展的当前用户；
 * 登录接口没有经过 RequireJWT，由登录服务在成功时自行写入扩展。
 *
 * 写入失败只记录告警，不影响原响应。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    http::header::USER_AGENT,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, warn};

use super::rate_limit::client_ip;
use crate::models::audit_logs::entities::{AuditAction, NewAuditLog, parse_audit_target};
use crate::models::users::entities::User;
use crate::storage::Storage;

#[derive(Clone, Default)]
pub struct AuditLogger;

impl<S, B> Transform<S, ServiceRequest> for AuditLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuditLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuditLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuditLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuditLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
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

        let method = req.method().as_str().to_string();
        let path = req.path().to_string();
        let target = AuditAction::from_request(&method, &path)
            .zip(parse_audit_target(&path));

        Box::pin(async move {
            let Some((action, (resource, resource_id))) = target else {
                return srv.call(req).await;
            };

            let ip_address = Some(client_ip(req.request()));
            let user_agent = req
                .headers()
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let storage = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|data| data.get_ref().clone());

            let res = srv.call(req).await?;

            let Some(storage) = storage else {
                debug!("Storage not available, skipping audit for {} {}", method, path);
                return Ok(res);
            };

            let user = res.request().extensions().get::<User>().cloned();
            let entry = NewAuditLog {
                user_id: user.as_ref().map(|u| u.id),
                username: user.map(|u| u.username),
                action,
                resource,
                resource_id,
                method,
                path,
                status_code: res.status().as_u16(),
                ip_address,
                user_agent,
            };

            if let Err(e) = storage.create_audit_log(entry).await {
                warn!("Failed to write audit log: {}", e);
            }

            Ok(res)
        })
    }
}
