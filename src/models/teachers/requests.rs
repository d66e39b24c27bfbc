use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::entities::TeacherStatus;
use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_bool;
use crate::utils::validate::{
    Validate, check_code, check_email, check_length, check_not_future, check_phone, today,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub department_id: Option<Uuid>,
    pub status: Option<TeacherStatus>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_deleted: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacherRequest {
    pub user_id: Option<Uuid>,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department_id: Option<Uuid>,
    pub title: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<TeacherStatus>,
}

impl Validate for CreateTeacherRequest {
    fn validate(&self) -> Result<()> {
        check_code("employee_number", &self.employee_number)?;
        check_length("first_name", &self.first_name, 1, 50)?;
        check_length("last_name", &self.last_name, 1, 50)?;
        check_email(&self.email)?;
        if let Some(phone) = &self.phone {
            check_phone(phone)?;
        }
        if let Some(title) = &self.title {
            check_length("title", title, 1, 50)?;
        }
        if let Some(hire_date) = self.hire_date {
            check_not_future("hire_date", hire_date, today())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeacherRequest {
    pub user_id: Option<Uuid>,
    pub employee_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department_id: Option<Uuid>,
    pub title: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<TeacherStatus>,
}

impl Validate for UpdateTeacherRequest {
    fn validate(&self) -> Result<()> {
        if let Some(number) = &self.employee_number {
            check_code("employee_number", number)?;
        }
        if let Some(first_name) = &self.first_name {
            check_length("first_name", first_name, 1, 50)?;
        }
        if let Some(last_name) = &self.last_name {
            check_length("last_name", last_name, 1, 50)?;
        }
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        if let Some(phone) = &self.phone {
            check_phone(phone)?;
        }
        if let Some(hire_date) = self.hire_date {
            check_not_future("hire_date", hire_date, today())?;
        }
        Ok(())
    }
}
