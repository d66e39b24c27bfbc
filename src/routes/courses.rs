use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::IncludeDeletedQuery;
use crate::models::courses::requests::{
    CourseListQuery, CourseStudentsQuery, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeUuid;

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn get_course(
    req: HttpRequest,
    id: SafeUuid,
    query: web::Query<IncludeDeletedQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .get_course(id.0, query.into_inner(), &req)
        .await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(body.into_inner(), &req).await
}

pub async fn update_course(
    req: HttpRequest,
    id: SafeUuid,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(id.0, &req).await
}

pub async fn restore_course(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.restore_course(id.0, &req).await
}

pub async fn list_course_students(
    req: HttpRequest,
    id: SafeUuid,
    query: web::Query<CourseStudentsQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .list_course_students(id.0, query.into_inner(), &req)
        .await
}

pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_course))
                    .route(
                        web::put()
                            .to(update_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/restore")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route(web::post().to(restore_course)),
            )
            // 教师只能查看自己任课课程的名单，由业务层检查
            .service(
                web::resource("/{id}/students")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::get().to(list_course_students)),
            ),
    );
}
