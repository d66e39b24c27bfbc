use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::common::PaginationQuery;
use crate::utils::validate::{Validate, check_length};

pub const DEFAULT_MAX_SCORE: f64 = 100.0;
pub const DEFAULT_WEIGHT: f64 = 100.0;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradeListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub enrollment_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub term_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGradeRequest {
    pub enrollment_id: Uuid,
    pub assessment: String,
    pub score: f64,
    pub max_score: Option<f64>,
    pub weight: Option<f64>,
    pub remarks: Option<String>,
}

impl CreateGradeRequest {
    pub fn max_score_or_default(&self) -> f64 {
        self.max_score.unwrap_or(DEFAULT_MAX_SCORE)
    }

    pub fn weight_or_default(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }
}

impl Validate for CreateGradeRequest {
    fn validate(&self) -> Result<()> {
        check_length("assessment", &self.assessment, 1, 50)?;
        validate_score(self.score, self.max_score_or_default(), self.weight_or_default())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGradeRequest {
    pub assessment: Option<String>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    pub weight: Option<f64>,
    pub remarks: Option<String>,
}

impl Validate for UpdateGradeRequest {
    fn validate(&self) -> Result<()> {
        if let Some(assessment) = &self.assessment {
            check_length("assessment", assessment, 1, 50)?;
        }
        Ok(())
    }
}

/// 分数规则：max_score > 0，0 <= score <= max_score，0 <= weight <= 100
pub fn validate_score(score: f64, max_score: f64, weight: f64) -> Result<()> {
    if !score.is_finite() || !max_score.is_finite() || !weight.is_finite() {
        return Err(EduSystemError::validation("Scores must be finite numbers"));
    }
    if max_score <= 0.0 {
        return Err(EduSystemError::validation("max_score must be greater than 0"));
    }
    if score < 0.0 || score > max_score {
        return Err(EduSystemError::validation(format!(
            "score must be between 0 and {max_score}"
        )));
    }
    if !(0.0..=100.0).contains(&weight) {
        return Err(EduSystemError::validation("weight must be between 0 and 100"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_rules() {
        assert!(validate_score(0.0, 100.0, 100.0).is_ok());
        assert!(validate_score(100.0, 100.0, 0.0).is_ok());
        assert!(validate_score(101.0, 100.0, 100.0).is_err());
        assert!(validate_score(-1.0, 100.0, 100.0).is_err());
        assert!(validate_score(5.0, 0.0, 100.0).is_err());
        assert!(validate_score(5.0, 10.0, 120.0).is_err());
        assert!(validate_score(f64::NAN, 10.0, 50.0).is_err());
    }

    #[test]
    fn test_defaults_applied() {
        let req: CreateGradeRequest = serde_json::from_str(&format!(
            r#"{{"enrollment_id": "{}", "assessment": "final", "score": 88}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert_eq!(req.max_score_or_default(), 100.0);
        assert_eq!(req.weight_or_default(), 100.0);
        assert!(req.validate().is_ok());
    }
}
