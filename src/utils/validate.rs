use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{EduSystemError, Result};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static FACULTY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{2,10}$").expect("Invalid faculty code regex"));

static ENTITY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,20}$").expect("Invalid code regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()-]{6,20}$").expect("Invalid phone regex"));

/// 请求 DTO 的校验入口
///
/// 服务层在访问存储前调用，失败时返回 `Validation` 错误（400）。
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_username(username: &str) -> std::result::Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Abcd1234",
        "Student1",
        "Teacher1",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

// 以下为 DTO 校验使用的小工具，均返回 `Validation` 错误

pub fn check_username(username: &str) -> Result<()> {
    validate_username(username).map_err(EduSystemError::validation)
}

pub fn check_email(email: &str) -> Result<()> {
    validate_email(email).map_err(EduSystemError::validation)
}

pub fn check_password(password: &str) -> Result<()> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(EduSystemError::validation(result.error_message()))
    }
}

pub fn check_faculty_code(code: &str) -> Result<()> {
    if FACULTY_CODE_RE.is_match(code) {
        Ok(())
    } else {
        Err(EduSystemError::validation(
            "Faculty code must be 2-10 uppercase letters or digits",
        ))
    }
}

pub fn check_code(field: &str, code: &str) -> Result<()> {
    if ENTITY_CODE_RE.is_match(code) {
        Ok(())
    } else {
        Err(EduSystemError::validation(format!(
            "{field} must be 2-20 letters, digits, underscores or hyphens"
        )))
    }
}

pub fn check_phone(phone: &str) -> Result<()> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(EduSystemError::validation("Phone number format is invalid"))
    }
}

/// 检查去除首尾空白后的字符长度
pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(EduSystemError::validation(format!(
            "{field} length must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub fn check_range<T: PartialOrd + std::fmt::Display>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EduSystemError::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(())
}

pub fn check_not_future(field: &str, date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date > today {
        return Err(EduSystemError::validation(format!(
            "{field} cannot be in the future"
        )));
    }
    Ok(())
}

pub fn check_in_past(field: &str, date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date >= today {
        return Err(EduSystemError::validation(format!(
            "{field} must be in the past"
        )));
    }
    Ok(())
}

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Student1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("this-name-is-too-long").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_faculty_code() {
        assert!(check_faculty_code("ENG").is_ok());
        assert!(check_faculty_code("SCI2024").is_ok());
        assert!(check_faculty_code("eng").is_err());
        assert!(check_faculty_code("E").is_err());
        assert!(check_faculty_code("ENGINEERING1").is_err());
    }

    #[test]
    fn test_dates() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();

        assert!(check_not_future("date", today, today).is_ok());
        assert!(check_not_future("date", tomorrow, today).is_err());
        assert!(check_in_past("date_of_birth", yesterday, today).is_ok());
        assert!(check_in_past("date_of_birth", today, today).is_err());
    }

    #[test]
    fn test_length_and_range() {
        assert!(check_length("name", "  Physics ", 1, 100).is_ok());
        assert!(check_length("name", "   ", 1, 100).is_err());
        assert!(check_range("credits", 3, 1, 10).is_ok());
        assert!(check_range("credits", 11, 1, 10).is_err());
    }
}
