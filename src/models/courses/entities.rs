use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::define_string_enum;

define_string_enum! {
    pub enum CourseStatus("course status") {
        Active => "active",
        Inactive => "inactive",
    }
}

// 课程
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub department_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub capacity: i32,
    pub status: CourseStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Course {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// 可以接受选课：未删除且处于开课状态
    pub fn is_open(&self) -> bool {
        !self.is_deleted() && self.status == CourseStatus::Active
    }
}
