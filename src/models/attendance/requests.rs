use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::AttendanceStatus;
use crate::errors::{EduSystemError, Result};
use crate::models::common::PaginationQuery;
use crate::utils::validate::{Validate, check_length, check_not_future, today};

/// 单次批量登记的最大条数
pub const MAX_BULK_RECORDS: usize = 500;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub status: Option<AttendanceStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceSummaryQuery {
    pub student_id: Uuid,
    pub course_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttendanceRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

impl Validate for CreateAttendanceRequest {
    fn validate(&self) -> Result<()> {
        check_not_future("date", self.date, today())?;
        if let Some(remarks) = &self.remarks {
            check_length("remarks", remarks, 0, 500)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkAttendanceEntry {
    pub student_id: Uuid,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

// 批量中的单条记录，失败时只影响这一条
impl Validate for BulkAttendanceEntry {
    fn validate(&self) -> Result<()> {
        if let Some(remarks) = &self.remarks {
            check_length("remarks", remarks, 0, 500)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkAttendanceRequest {
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub records: Vec<BulkAttendanceEntry>,
}

impl Validate for BulkAttendanceRequest {
    fn validate(&self) -> Result<()> {
        check_not_future("date", self.date, today())?;
        if self.records.is_empty() {
            return Err(EduSystemError::validation("records must not be empty"));
        }
        if self.records.len() > MAX_BULK_RECORDS {
            return Err(EduSystemError::validation(format!(
                "At most {MAX_BULK_RECORDS} records can be submitted at once"
            )));
        }
        Ok(())
    }
}

// 批量登记的逐条结果
#[derive(Debug, Clone, Serialize)]
pub struct BulkAttendanceRowResult {
    pub student_id: Uuid,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkAttendanceResult {
    pub created: usize,
    pub failed: usize,
    pub results: Vec<BulkAttendanceRowResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub remarks: Option<String>,
}

impl Validate for UpdateAttendanceRequest {
    fn validate(&self) -> Result<()> {
        if let Some(remarks) = &self.remarks {
            check_length("remarks", remarks, 0, 500)?;
        }
        Ok(())
    }
}
