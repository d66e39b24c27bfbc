use serde::Deserialize;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{Validate, check_code, check_length};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub faculty_id: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartmentRequest {
    pub faculty_id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub head_teacher_id: Option<Uuid>,
}

impl Validate for CreateDepartmentRequest {
    fn validate(&self) -> Result<()> {
        check_code("code", &self.code)?;
        check_length("name", &self.name, 1, 100)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub faculty_id: Option<Uuid>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub head_teacher_id: Option<Uuid>,
}

impl Validate for UpdateDepartmentRequest {
    fn validate(&self) -> Result<()> {
        if let Some(code) = &self.code {
            check_code("code", code)?;
        }
        if let Some(name) = &self.name {
            check_length("name", name, 1, 100)?;
        }
        Ok(())
    }
}
