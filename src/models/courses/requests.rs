use serde::Deserialize;
use uuid::Uuid;

use super::entities::CourseStatus;
use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_bool;
use crate::utils::validate::{Validate, check_code, check_length, check_range};

pub const MIN_CREDITS: i32 = 1;
pub const MAX_CREDITS: i32 = 10;
pub const MIN_CAPACITY: i32 = 1;
pub const MAX_CAPACITY: i32 = 1000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub department_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub status: Option<CourseStatus>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_deleted: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseStudentsQuery {
    pub term_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub department_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub capacity: i32,
    pub status: Option<CourseStatus>,
}

impl Validate for CreateCourseRequest {
    fn validate(&self) -> Result<()> {
        check_code("code", &self.code)?;
        check_length("name", &self.name, 1, 150)?;
        check_range("credits", self.credits, MIN_CREDITS, MAX_CREDITS)?;
        check_range("capacity", self.capacity, MIN_CAPACITY, MAX_CAPACITY)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourseRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub department_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub capacity: Option<i32>,
    pub status: Option<CourseStatus>,
}

impl Validate for UpdateCourseRequest {
    fn validate(&self) -> Result<()> {
        if let Some(code) = &self.code {
            check_code("code", code)?;
        }
        if let Some(name) = &self.name {
            check_length("name", name, 1, 150)?;
        }
        if let Some(credits) = self.credits {
            check_range("credits", credits, MIN_CREDITS, MAX_CREDITS)?;
        }
        if let Some(capacity) = self.capacity {
            check_range("capacity", capacity, MIN_CAPACITY, MAX_CAPACITY)?;
        }
        Ok(())
    }
}
