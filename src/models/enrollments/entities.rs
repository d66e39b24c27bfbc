use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::define_string_enum;
use crate::models::courses::entities::Course;
use crate::models::students::entities::Student;

define_string_enum! {
    pub enum EnrollmentStatus("enrollment status") {
        Enrolled => "enrolled",
        Dropped => "dropped",
        Completed => "completed",
    }
}

impl EnrollmentStatus {
    /// 仍然有效（未退课）的选课状态
    pub fn is_active(&self) -> bool {
        !matches!(self, EnrollmentStatus::Dropped)
    }
}

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub term_id: Uuid,
    pub status: EnrollmentStatus,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub dropped_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生选课列表项（附课程信息）
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentWithCourse {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course: Course,
}

// 课程名单项（附学生信息）
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub enrollment_id: Uuid,
    pub term_id: Uuid,
    pub status: EnrollmentStatus,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub student: Student,
}
