use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::define_string_enum;

define_string_enum! {
    /// 学籍状态
    pub enum StudentStatus("student status") {
        Active => "active",
        Suspended => "suspended",
        Graduated => "graduated",
        Withdrawn => "withdrawn",
    }
}

define_string_enum! {
    pub enum Gender("gender") {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department_id: Option<Uuid>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: StudentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Student {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
