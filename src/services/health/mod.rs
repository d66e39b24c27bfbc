use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::warn;

use crate::models::{ApiResponse, AppStartTime, ErrorCode, system::responses::HealthResponse};

pub struct HealthService;

impl HealthService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 数据库可达时返回 200，否则 503
    pub async fn check(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let uptime_seconds = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds().max(0))
            .unwrap_or(0);

        let database_ok = match super::storage_from_request(request) {
            Ok(storage) => match storage.ping().await {
                Ok(()) => true,
                Err(e) => {
                    warn!("Health check database ping failed: {}", e);
                    false
                }
            },
            Err(e) => {
                warn!("Health check without storage: {}", e);
                false
            }
        };

        let body = HealthResponse {
            status: if database_ok { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds,
            database: if database_ok { "up" } else { "down" },
        };

        if database_ok {
            Ok(HttpResponse::Ok().json(ApiResponse::success(body, "Service is healthy")))
        } else {
            Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
                ErrorCode::ServiceUnavailable,
                body,
                "Database is unreachable",
            )))
        }
    }
}
