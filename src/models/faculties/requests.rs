use serde::Deserialize;

use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{Validate, check_faculty_code, check_length};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacultyListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFacultyRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub dean_name: Option<String>,
}

impl Validate for CreateFacultyRequest {
    fn validate(&self) -> Result<()> {
        check_faculty_code(&self.code)?;
        check_length("name", &self.name, 1, 100)?;
        if let Some(dean) = &self.dean_name {
            check_length("dean_name", dean, 1, 100)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFacultyRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub dean_name: Option<String>,
}

impl Validate for UpdateFacultyRequest {
    fn validate(&self) -> Result<()> {
        if let Some(code) = &self.code {
            check_faculty_code(code)?;
        }
        if let Some(name) = &self.name {
            check_length("name", name, 1, 100)?;
        }
        if let Some(dean) = &self.dean_name {
            check_length("dean_name", dean, 1, 100)?;
        }
        Ok(())
    }
}
