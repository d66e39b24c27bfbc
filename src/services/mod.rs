pub mod academic_terms;
pub mod access;
pub mod attendance;
pub mod audit_logs;
pub mod auth;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod faculties;
pub mod grades;
pub mod health;
pub mod references;
pub mod schedules;
pub mod students;
pub mod teachers;
pub mod users;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::{EduSystemError, Result};
use crate::middlewares::require_jwt::user_cache_key;
use crate::storage::Storage;

pub use academic_terms::AcademicTermService;
pub use attendance::AttendanceService;
pub use audit_logs::AuditLogService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use departments::DepartmentService;
pub use enrollments::EnrollmentService;
pub use faculties::FacultyService;
pub use grades::GradeService;
pub use health::HealthService;
pub use schedules::ScheduleService;
pub use students::StudentService;
pub use teachers::TeacherService;
pub use users::UserService;

/// 从应用数据中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| EduSystemError::internal("Storage not found in app data"))
}

/// 用户被修改后清除认证缓存，下次请求重新从存储加载
pub(crate) async fn invalidate_user_cache(request: &HttpRequest, user_id: uuid::Uuid) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        cache.remove(&user_cache_key(user_id)).await;
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    //! 服务层测试：构造带存储和当前用户的请求

    use actix_web::{HttpMessage, HttpRequest, test, web};
    use std::sync::Arc;

    use crate::models::users::entities::{User, UserRole};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::Storage;

    pub async fn account(storage: &Arc<dyn Storage>, name: &str, role: UserRole) -> User {
        storage
            .create_user(CreateUserRequest {
                username: name.to_string(),
                email: format!("{name}@school.edu"),
                password: "hash".into(),
                role,
                display_name: None,
            })
            .await
            .unwrap()
    }

    /// 未登录的请求，只带存储
    pub fn anonymous_request(storage: &Arc<dyn Storage>) -> HttpRequest {
        test::TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request()
    }

    pub fn request_as(storage: &Arc<dyn Storage>, user: &User) -> HttpRequest {
        let req = anonymous_request(storage);
        req.extensions_mut().insert(user.clone());
        req
    }

    /// 服务返回错误时取出状态码
    pub fn status_of(result: actix_web::Result<actix_web::HttpResponse>) -> u16 {
        match result {
            Ok(resp) => resp.status().as_u16(),
            Err(err) => err.as_response_error().status_code().as_u16(),
        }
    }
}
