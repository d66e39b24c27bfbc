use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::audit_logs::requests::AuditLogListQuery;
use crate::models::users::entities::UserRole;
use crate::services::AuditLogService;
use crate::utils::SafeUuid;

static AUDIT_LOG_SERVICE: Lazy<AuditLogService> = Lazy::new(AuditLogService::new_lazy);

pub async fn list_audit_logs(
    req: HttpRequest,
    query: web::Query<AuditLogListQuery>,
) -> ActixResult<HttpResponse> {
    AUDIT_LOG_SERVICE
        .list_audit_logs(query.into_inner(), &req)
        .await
}

pub async fn get_audit_log(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    AUDIT_LOG_SERVICE.get_audit_log(id.0, &req).await
}

pub fn configure_audit_log_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/audit-logs")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_audit_logs))
                    .route("/{id}", web::get().to(get_audit_log)),
            ),
    );
}
