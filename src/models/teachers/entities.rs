use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::define_string_enum;

define_string_enum! {
    /// 教师在职状态
    pub enum TeacherStatus("teacher status") {
        Active => "active",
        OnLeave => "on_leave",
        Retired => "retired",
    }
}

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department_id: Option<Uuid>,
    pub title: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: TeacherStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Teacher {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
