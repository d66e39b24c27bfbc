use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::IncludeDeletedQuery;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListQuery, UpdateStudentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::StudentService;
use crate::utils::SafeUuid;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn get_student(
    req: HttpRequest,
    id: SafeUuid,
    query: web::Query<IncludeDeletedQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .get_student(id.0, query.into_inner(), &req)
        .await
}

pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(body.into_inner(), &req).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeUuid,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_student(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(id.0, &req).await
}

pub async fn restore_student(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.restore_student(id.0, &req).await
}

pub async fn list_student_enrollments(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_enrollments(id.0, &req).await
}

pub async fn get_transcript(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_transcript(id.0, &req).await
}

pub async fn get_student_attendance(req: HttpRequest, id: SafeUuid) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_attendance(id.0, &req).await
}

// 配置路由：学生只能访问自己的档案，由业务层检查
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_students)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_student)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_student))
                    .route(
                        web::put()
                            .to(update_student)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_student)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/restore")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route(web::post().to(restore_student)),
            )
            .service(
                web::resource("/{id}/enrollments").route(web::get().to(list_student_enrollments)),
            )
            .service(web::resource("/{id}/transcript").route(web::get().to(get_transcript)))
            .service(
                web::resource("/{id}/attendance").route(web::get().to(get_student_attendance)),
            ),
    );
}
