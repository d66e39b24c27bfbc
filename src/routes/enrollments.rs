use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{CreateEnrollmentRequest, EnrollmentListQuery};
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::SafeUuid;

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(query.into_inner(), &req)
        .await
}

pub async fn create_enrollment(
    req: HttpRequest,
    body: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .create_enrollment(body.into_inner(), &req)
        .await
}

pub async fn get_enrollment(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.get_enrollment(id.0, &req).await
}

pub async fn drop_enrollment(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.drop_enrollment(id.0, &req).await
}

pub async fn complete_enrollment(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.complete_enrollment(id.0, &req).await
}

pub async fn delete_enrollment(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.delete_enrollment(id.0, &req).await
}

// 配置路由：学生只能为自己选课、退课，由业务层检查
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_enrollments))
                    .route(
                        web::post()
                            .to(create_enrollment)
                            .wrap(middlewares::RequireRole::new_any(&[
                                &UserRole::Admin,
                                &UserRole::Staff,
                                &UserRole::Student,
                            ])),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_enrollment))
                    .route(
                        web::delete()
                            .to(delete_enrollment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(web::resource("/{id}/drop").route(web::put().to(drop_enrollment)))
            .service(
                web::resource("/{id}/complete")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::put().to(complete_enrollment)),
            ),
    );
}
