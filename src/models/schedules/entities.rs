use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 课表时段，day_of_week: 0 = 周一 ... 6 = 周日
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub term_id: Uuid,
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Schedule {
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        time_ranges_overlap(self.start_time, self.end_time, start, end)
    }
}

/// 半开区间重叠判断，首尾相接不算冲突
pub fn time_ranges_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_overlap() {
        assert!(time_ranges_overlap(t(9, 0), t(10, 30), t(10, 0), t(11, 0)));
        assert!(time_ranges_overlap(t(9, 0), t(12, 0), t(10, 0), t(11, 0)));
        assert!(time_ranges_overlap(t(10, 0), t(11, 0), t(9, 0), t(12, 0)));
    }

    #[test]
    fn test_touching_edges_do_not_conflict() {
        assert!(!time_ranges_overlap(t(9, 0), t(10, 0), t(10, 0), t(11, 0)));
        assert!(!time_ranges_overlap(t(10, 0), t(11, 0), t(9, 0), t(10, 0)));
        assert!(!time_ranges_overlap(t(8, 0), t(9, 0), t(13, 0), t(14, 0)));
    }
}
