use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::define_string_enum;

define_string_enum! {
    pub enum AttendanceStatus("attendance status") {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

// 考勤记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub recorded_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 考勤统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub student_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<Uuid>,
    pub total: u64,
    pub present: u64,
    pub absent: u64,
    pub late: u64,
    pub excused: u64,
    /// (present + late) / total，没有记录时为 0
    pub attendance_rate: f64,
}

impl AttendanceSummary {
    pub fn from_records<'a>(
        student_id: Uuid,
        course_id: Option<Uuid>,
        records: impl IntoIterator<Item = &'a AttendanceRecord>,
    ) -> Self {
        let mut summary = Self {
            student_id,
            course_id,
            total: 0,
            present: 0,
            absent: 0,
            late: 0,
            excused: 0,
            attendance_rate: 0.0,
        };
        for record in records {
            summary.total += 1;
            match record.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Late => summary.late += 1,
                AttendanceStatus::Excused => summary.excused += 1,
            }
        }
        if summary.total > 0 {
            summary.attendance_rate =
                (summary.present + summary.late) as f64 / summary.total as f64;
        }
        summary
    }
}

// 学生考勤总览：整体与按课程
#[derive(Debug, Clone, Serialize)]
pub struct StudentAttendanceOverview {
    pub overall: AttendanceSummary,
    pub courses: Vec<AttendanceSummary>,
}

impl StudentAttendanceOverview {
    pub fn from_records(student_id: Uuid, records: &[AttendanceRecord]) -> Self {
        let mut course_ids: Vec<Uuid> = records.iter().map(|r| r.course_id).collect();
        course_ids.sort();
        course_ids.dedup();

        let courses = course_ids
            .into_iter()
            .map(|course_id| {
                AttendanceSummary::from_records(
                    student_id,
                    Some(course_id),
                    records.iter().filter(|r| r.course_id == course_id),
                )
            })
            .collect();

        Self {
            overall: AttendanceSummary::from_records(student_id, None, records),
            courses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(course_id: Uuid, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            student_id: Uuid::nil(),
            course_id,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            status,
            remarks: None,
            recorded_by: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_rate_counts_present_and_late() {
        let course = Uuid::new_v4();
        let records = vec![
            record(course, AttendanceStatus::Present),
            record(course, AttendanceStatus::Late),
            record(course, AttendanceStatus::Absent),
            record(course, AttendanceStatus::Excused),
        ];
        let summary = AttendanceSummary::from_records(Uuid::nil(), Some(course), &records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.late, 1);
        assert!((summary.attendance_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_summary_rate_is_zero() {
        let summary = AttendanceSummary::from_records(Uuid::nil(), None, &[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.attendance_rate, 0.0);
    }

    #[test]
    fn test_overview_groups_by_course() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let records = vec![
            record(a, AttendanceStatus::Present),
            record(a, AttendanceStatus::Absent),
            record(b, AttendanceStatus::Present),
        ];
        let overview = StudentAttendanceOverview::from_records(Uuid::nil(), &records);
        assert_eq!(overview.overall.total, 3);
        assert_eq!(overview.courses.len(), 2);
        let course_a = overview
            .courses
            .iter()
            .find(|s| s.course_id == Some(a))
            .unwrap();
        assert_eq!(course_a.total, 2);
    }
}
