use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::entities::{Gender, StudentStatus};
use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_bool;
use crate::utils::validate::{
    Validate, check_code, check_email, check_in_past, check_length, check_not_future, check_phone,
    today,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub department_id: Option<Uuid>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_deleted: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
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
    pub status: Option<StudentStatus>,
}

impl Validate for CreateStudentRequest {
    fn validate(&self) -> Result<()> {
        check_code("student_number", &self.student_number)?;
        check_length("first_name", &self.first_name, 1, 50)?;
        check_length("last_name", &self.last_name, 1, 50)?;
        check_email(&self.email)?;
        if let Some(dob) = self.date_of_birth {
            check_in_past("date_of_birth", dob, today())?;
        }
        if let Some(phone) = &self.phone {
            check_phone(phone)?;
        }
        if let Some(address) = &self.address {
            check_length("address", address, 1, 255)?;
        }
        if let Some(enrollment_date) = self.enrollment_date {
            check_not_future("enrollment_date", enrollment_date, today())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub user_id: Option<Uuid>,
    pub student_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department_id: Option<Uuid>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<StudentStatus>,
}

impl Validate for UpdateStudentRequest {
    fn validate(&self) -> Result<()> {
        if let Some(number) = &self.student_number {
            check_code("student_number", number)?;
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
        if let Some(dob) = self.date_of_birth {
            check_in_past("date_of_birth", dob, today())?;
        }
        if let Some(phone) = &self.phone {
            check_phone(phone)?;
        }
        if let Some(address) = &self.address {
            check_length("address", address, 1, 255)?;
        }
        Ok(())
    }
}
