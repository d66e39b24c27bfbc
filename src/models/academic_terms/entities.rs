use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 学期
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicTerm {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub enrollment_start: Option<NaiveDate>,
    pub enrollment_end: Option<NaiveDate>,
    pub is_current: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl AcademicTerm {
    /// 给定日期是否在选课窗口内，未设置的边界视为不限
    pub fn enrollment_open_on(&self, date: NaiveDate) -> bool {
        let after_start = self.enrollment_start.is_none_or(|start| date >= start);
        let before_end = self.enrollment_end.is_none_or(|end| date <= end);
        after_start && before_end
    }

    /// 闭区间 [start, end] 是否与本学期重叠
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn term() -> AcademicTerm {
        AcademicTerm {
            id: Uuid::new_v4(),
            code: "2025S".into(),
            name: "Spring 2025".into(),
            start_date: date(2025, 2, 1),
            end_date: date(2025, 6, 30),
            enrollment_start: Some(date(2025, 1, 10)),
            enrollment_end: Some(date(2025, 2, 15)),
            is_current: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let t = term();
        assert!(t.overlaps(date(2025, 6, 30), date(2025, 9, 1)));
        assert!(t.overlaps(date(2025, 1, 1), date(2025, 2, 1)));
        assert!(!t.overlaps(date(2025, 7, 1), date(2025, 12, 31)));
    }

    #[test]
    fn test_enrollment_window() {
        let mut t = term();
        assert!(t.enrollment_open_on(date(2025, 1, 10)));
        assert!(t.enrollment_open_on(date(2025, 2, 15)));
        assert!(!t.enrollment_open_on(date(2025, 2, 16)));

        t.enrollment_start = None;
        t.enrollment_end = None;
        assert!(t.enrollment_open_on(date(2030, 1, 1)));
    }
}
