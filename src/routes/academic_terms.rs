use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::academic_terms::requests::{
    AcademicTermListQuery, CreateAcademicTermRequest, UpdateAcademicTermRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AcademicTermService;
use crate::utils::SafeUuid;

static TERM_SERVICE: Lazy<AcademicTermService> = Lazy::new(AcademicTermService::new_lazy);

pub async fn list_terms(
    req: HttpRequest,
    query: web::Query<AcademicTermListQuery>,
) -> ActixResult<HttpResponse> {
    TERM_SERVICE.list_terms(query.into_inner(), &req).await
}

pub async fn get_current_term(req: HttpRequest) -> ActixResult<HttpResponse> {
    TERM_SERVICE.get_current_term(&req).await
}

pub async fn get_term(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    TERM_SERVICE.get_term(id.0, &req).await
}

pub async fn create_term(
    req: HttpRequest,
    body: web::Json<CreateAcademicTermRequest>,
) -> ActixResult<HttpResponse> {
    TERM_SERVICE.create_term(body.into_inner(), &req).await
}

pub async fn update_term(
    req: HttpRequest,
    id: SafeUuid,
    body: web::Json<UpdateAcademicTermRequest>,
) -> ActixResult<HttpResponse> {
    TERM_SERVICE.update_term(id.0, body.into_inner(), &req).await
}

pub async fn delete_term(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    TERM_SERVICE.delete_term(id.0, &req).await
}

pub async fn activate_term(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    TERM_SERVICE.activate_term(id.0, &req).await
}

pub fn configure_academic_term_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/academic-terms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_terms))
                    .route(
                        web::post()
                            .to(create_term)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            // 必须在 /{id} 之前注册
            .service(web::resource("/current").route(web::get().to(get_current_term)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_term))
                    .route(
                        web::put()
                            .to(update_term)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_term)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/activate")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route(web::post().to(activate_term)),
            ),
    );
}
