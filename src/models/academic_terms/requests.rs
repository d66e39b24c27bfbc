use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::{EduSystemError, Result};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::{deserialize_nullable, deserialize_optional_bool};
use crate::utils::validate::{Validate, check_code, check_length};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcademicTermListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_current: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAcademicTermRequest {
    pub code: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub enrollment_start: Option<NaiveDate>,
    pub enrollment_end: Option<NaiveDate>,
    /// 创建后立即设为当前学期
    #[serde(default)]
    pub is_current: bool,
}

impl Validate for CreateAcademicTermRequest {
    fn validate(&self) -> Result<()> {
        check_code("code", &self.code)?;
        check_length("name", &self.name, 1, 100)?;
        validate_term_dates(
            self.start_date,
            self.end_date,
            self.enrollment_start,
            self.enrollment_end,
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAcademicTermRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    // null 清除选课窗口
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub enrollment_start: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub enrollment_end: Option<Option<NaiveDate>>,
}

impl Validate for UpdateAcademicTermRequest {
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

/// 学期日期规则：开始早于结束；选课窗口起止有序且不晚于学期结束
pub fn validate_term_dates(
    start: NaiveDate,
    end: NaiveDate,
    enrollment_start: Option<NaiveDate>,
    enrollment_end: Option<NaiveDate>,
) -> Result<()> {
    if start >= end {
        return Err(EduSystemError::validation(
            "start_date must be before end_date",
        ));
    }
    if let (Some(es), Some(ee)) = (enrollment_start, enrollment_end)
        && es > ee
    {
        return Err(EduSystemError::validation(
            "enrollment_start must not be after enrollment_end",
        ));
    }
    if enrollment_start.is_some_and(|es| es > end) || enrollment_end.is_some_and(|ee| ee > end) {
        return Err(EduSystemError::validation(
            "Enrollment window must not extend past the end of the term",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_term_date_rules() {
        assert!(validate_term_dates(date(2025, 2, 1), date(2025, 6, 30), None, None).is_ok());
        assert!(validate_term_dates(date(2025, 6, 30), date(2025, 2, 1), None, None).is_err());
        assert!(validate_term_dates(date(2025, 2, 1), date(2025, 2, 1), None, None).is_err());
        assert!(
            validate_term_dates(
                date(2025, 2, 1),
                date(2025, 6, 30),
                Some(date(2025, 1, 15)),
                Some(date(2025, 2, 10)),
            )
            .is_ok()
        );
        assert!(
            validate_term_dates(
                date(2025, 2, 1),
                date(2025, 6, 30),
                Some(date(2025, 2, 10)),
                Some(date(2025, 1, 15)),
            )
            .is_err()
        );
        assert!(
            validate_term_dates(
                date(2025, 2, 1),
                date(2025, 6, 30),
                None,
                Some(date(2025, 7, 15)),
            )
            .is_err()
        );
    }

    #[test]
    fn test_update_distinguishes_null_from_missing() {
        let req: UpdateAcademicTermRequest =
            serde_json::from_str(r#"{"enrollment_start": null, "enrollment_end": "2025-02-15"}"#)
                .unwrap();
        assert_eq!(req.enrollment_start, Some(None));
        assert_eq!(req.enrollment_end, Some(Some(date(2025, 2, 15))));

        let req: UpdateAcademicTermRequest = serde_json::from_str(r#"{"name": "Spring"}"#).unwrap();
        assert_eq!(req.enrollment_start, None);

        let req: CreateAcademicTermRequest = serde_json::from_str(
            r#"{"code": "2025S", "name": "Spring", "start_date": "2025-02-01", "end_date": "2025-06-30"}"#,
        )
        .unwrap();
        assert!(!req.is_current);
    }
}
