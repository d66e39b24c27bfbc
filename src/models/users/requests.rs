use super::entities::{UserRole, UserStatus};
use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{
    Validate, check_email, check_length, check_password, check_username,
};
use serde::Deserialize;

// 用户查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 用户创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub display_name: Option<String>,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<()> {
        check_username(&self.username)?;
        check_email(&self.email)?;
        check_password(&self.password)?;
        if let Some(name) = &self.display_name {
            check_length("display_name", name, 1, 100)?;
        }
        Ok(())
    }
}

// 用户更新请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub display_name: Option<String>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<()> {
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        if let Some(password) = &self.password {
            check_password(password)?;
        }
        if let Some(name) = &self.display_name {
            check_length("display_name", name, 1, 100)?;
        }
        Ok(())
    }
}
