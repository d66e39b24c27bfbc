use serde::Deserialize;

use crate::errors::{EduSystemError, Result};
use crate::utils::validate::{Validate, check_password};

// 用户登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// 用户名或邮箱
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(EduSystemError::validation(
                "Username and password are required",
            ));
        }
        Ok(())
    }
}

// 修改密码请求
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<()> {
        if self.current_password == self.new_password {
            return Err(EduSystemError::validation(
                "New password must differ from the current password",
            ));
        }
        check_password(&self.new_password)
    }
}
