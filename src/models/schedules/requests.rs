use chrono::NaiveTime;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;
use crate::utils::validate::{Validate, check_length, check_range};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub term_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub day_of_week: Option<i64>,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleRequest {
    pub course_id: Uuid,
    pub term_id: Uuid,
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
}

impl Validate for CreateScheduleRequest {
    fn validate(&self) -> Result<()> {
        validate_slot(self.day_of_week, self.start_time, self.end_time)?;
        check_length("room", &self.room, 1, 50)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScheduleRequest {
    pub course_id: Option<Uuid>,
    pub term_id: Option<Uuid>,
    pub day_of_week: Option<i32>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub room: Option<String>,
}

impl Validate for UpdateScheduleRequest {
    fn validate(&self) -> Result<()> {
        if let Some(room) = &self.room {
            check_length("room", room, 1, 50)?;
        }
        Ok(())
    }
}

/// 时段规则：day_of_week 在 0..=6，开始早于结束
pub fn validate_slot(day_of_week: i32, start: NaiveTime, end: NaiveTime) -> Result<()> {
    check_range("day_of_week", day_of_week, 0, 6)?;
    if start >= end {
        return Err(EduSystemError::validation(
            "start_time must be before end_time",
        ));
    }
    Ok(())
}
