pub mod academic_terms;
pub mod attendance;
pub mod audit_logs;
pub mod auth;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod faculties;
pub mod grades;
pub mod health;
pub mod schedules;
pub mod students;
pub mod teachers;
pub mod users;

use actix_web::{HttpResponse, web};

use crate::models::{ApiResponse, ErrorCode};

pub use academic_terms::configure_academic_term_routes;
pub use attendance::configure_attendance_routes;
pub use audit_logs::configure_audit_log_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use departments::configure_department_routes;
pub use enrollments::configure_enrollment_routes;
pub use faculties::configure_faculty_routes;
pub use grades::configure_grade_routes;
pub use health::configure_health_routes;
pub use schedules::configure_schedule_routes;
pub use students::configure_student_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

/// 注册全部 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_faculty_routes)
        .configure(configure_department_routes)
        .configure(configure_academic_term_routes)
        .configure(configure_teacher_routes)
        .configure(configure_student_routes)
        .configure(configure_course_routes)
        .configure(configure_enrollment_routes)
        .configure(configure_grade_routes)
        .configure(configure_attendance_routes)
        .configure(configure_schedule_routes)
        .configure(configure_audit_log_routes);
}

/// 未匹配的路由返回统一的 404 响应
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::NotFound,
        "The requested resource was not found",
    ))
}
