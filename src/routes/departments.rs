use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::DepartmentService;
use crate::utils::SafeUuid;

static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);

pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentListQuery>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .list_departments(query.into_inner(), &req)
        .await
}

pub async fn get_department(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.get_department(id.0, &req).await
}

pub async fn create_department(
    req: HttpRequest,
    body: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .create_department(body.into_inner(), &req)
        .await
}

pub async fn update_department(
    req: HttpRequest,
    id: SafeUuid,
    body: web::Json<UpdateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .update_department(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_department(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.delete_department(id.0, &req).await
}

pub fn configure_department_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/departments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_departments))
                    .route(
                        web::post()
                            .to(create_department)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_department))
                    .route(
                        web::put()
                            .to(update_department)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_department)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
