pub mod academic_terms;
pub mod attendance;
pub mod audit_logs;
pub mod auth;
pub mod common;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod faculties;
pub mod grades;
pub mod schedules;
pub mod students;
pub mod system;
pub mod teachers;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, IncludeDeletedQuery, PaginatedResponse, PaginationMeta,
    PaginationQuery,
};
pub use system::entities::AppStartTime;
