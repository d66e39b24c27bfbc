//! 请求日志中间件：记录方法、路径、状态码与耗时

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Clone, Default)]
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
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
        let method = req.method().to_string();
        let path = req.path().to_string();
        let started = Instant::now();

        Box::pin(async move {
            let result = srv.call(req).await;
            let elapsed_ms = started.elapsed().as_millis();

            match &result {
                Ok(res) if res.status().is_server_error() => {
                    warn!(
                        method = %method,
                        path = %path,
                        status = res.status().as_u16(),
                        elapsed_ms = elapsed_ms as u64,
                        "request failed"
                    );
                }
                Ok(res) => {
                    info!(
                        method = %method,
                        path = %path,
                        status = res.status().as_u16(),
                        elapsed_ms = elapsed_ms as u64,
                        "request completed"
                    );
                }
                Err(e) => {
                    warn!(method = %method, path = %path, elapsed_ms = elapsed_ms as u64, "request error: {}", e);
                }
            }

            result
        })
    }
}
