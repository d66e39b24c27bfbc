use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::faculties::requests::{
    CreateFacultyRequest, FacultyListQuery, UpdateFacultyRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::FacultyService;
use crate::utils::SafeUuid;

static FACULTY_SERVICE: Lazy<FacultyService> = Lazy::new(FacultyService::new_lazy);

pub async fn list_faculties(
    req: HttpRequest,
    query: web::Query<FacultyListQuery>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.list_faculties(query.into_inner(), &req).await
}

pub async fn get_faculty(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.get_faculty(id.0, &req).await
}

pub async fn create_faculty(
    req: HttpRequest,
    body: web::Json<CreateFacultyRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.create_faculty(body.into_inner(), &req).await
}

pub async fn update_faculty(
    req: HttpRequest,
    id: SafeUuid,
    body: web::Json<UpdateFacultyRequest>,
) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE
        .update_faculty(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_faculty(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    FACULTY_SERVICE.delete_faculty(id.0, &req).await
}

// 配置路由：登录用户可读，管理员与教务人员可写
pub fn configure_faculty_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/faculties")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_faculties))
                    .route(
                        web::post()
                            .to(create_faculty)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_faculty))
                    .route(
                        web::put()
                            .to(update_faculty)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_faculty)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
