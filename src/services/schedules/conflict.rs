//! 课表冲突检查
//!
//! 同一学期、同一天内，时间重叠的两个时段若满足以下任一条件即为冲突：
//! 同一教室；同一门课程；两门课程由同一位教师任教。首尾相接不算重叠。

use chrono::NaiveTime;
use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::courses::entities::Course;
use crate::models::schedules::entities::Schedule;
use crate::storage::Storage;

/// 待检查的时段
#[derive(Debug, Clone)]
pub struct Slot<'a> {
    pub course: &'a Course,
    pub term_id: Uuid,
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Room,
    Course,
    Teacher,
}

impl ConflictKind {
    fn describe(&self) -> &'static str {
        match self {
            ConflictKind::Room => "room is already booked",
            ConflictKind::Course => "course already has a class",
            ConflictKind::Teacher => "teacher already has a class",
        }
    }
}

/// 判断两个时段的冲突类型，other_teacher 为 other 所属课程的任课教师
pub fn conflict_kind(
    slot: &Slot<'_>,
    other: &Schedule,
    other_teacher: Option<Uuid>,
) -> Option<ConflictKind> {
    if other.term_id != slot.term_id || other.day_of_week != slot.day_of_week {
        return None;
    }
    if !other.overlaps(slot.start_time, slot.end_time) {
        return None;
    }
    if other.room.eq_ignore_ascii_case(slot.room) {
        Some(ConflictKind::Room)
    } else if other.course_id == slot.course.id {
        Some(ConflictKind::Course)
    } else if slot.course.teacher_id.is_some() && slot.course.teacher_id == other_teacher {
        Some(ConflictKind::Teacher)
    } else {
        None
    }
}

/// 与已有课表比较，发现冲突时返回 409 并指明冲突的时段
pub async fn ensure_no_conflict(
    storage: &dyn Storage,
    slot: &Slot<'_>,
    exclude_id: Option<Uuid>,
) -> Result<()> {
    let same_day = storage
        .list_schedules_for_day(slot.term_id, slot.day_of_week)
        .await?;

    let mut teachers: HashMap<Uuid, Option<Uuid>> = HashMap::new();
    for other in same_day.iter().filter(|s| Some(s.id) != exclude_id) {
        let other_teacher = match teachers.get(&other.course_id) {
            Some(teacher) => *teacher,
            None => {
                let teacher = storage
                    .get_course_by_id(other.course_id, true)
                    .await?
                    .and_then(|course| course.teacher_id);
                teachers.insert(other.course_id, teacher);
                teacher
            }
        };

        if let Some(kind) = conflict_kind(slot, other, other_teacher) {
            return Err(EduSystemError::conflict(format!(
                "Schedule conflict: {} (slot {} in room {}, {}-{})",
                kind.describe(),
                other.id,
                other.room,
                other.start_time.format("%H:%M"),
                other.end_time.format("%H:%M"),
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::CourseStatus;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn course(teacher_id: Option<Uuid>) -> Course {
        Course {
            id: Uuid::new_v4(),
            code: "CS101".into(),
            name: "Intro".into(),
            description: None,
            credits: 3,
            department_id: None,
            teacher_id,
            capacity: 30,
            status: CourseStatus::Active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            deleted_at: None,
        }
    }

    fn schedule(course_id: Uuid, term_id: Uuid, start: NaiveTime, end: NaiveTime, room: &str) -> Schedule {
        Schedule {
            id: Uuid::new_v4(),
            course_id,
            term_id,
            day_of_week: 1,
            start_time: start,
            end_time: end,
            room: room.into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_conflict_kinds() {
        let teacher = Uuid::new_v4();
        let term = Uuid::new_v4();
        let c = course(Some(teacher));
        let slot = Slot {
            course: &c,
            term_id: term,
            day_of_week: 1,
            start_time: t(9, 0),
            end_time: t(10, 30),
            room: "A101",
        };

        let other_course = Uuid::new_v4();
        let same_room = schedule(other_course, term, t(10, 0), t(11, 0), "a101");
        assert_eq!(conflict_kind(&slot, &same_room, None), Some(ConflictKind::Room));

        let same_course = schedule(c.id, term, t(10, 0), t(11, 0), "B202");
        assert_eq!(conflict_kind(&slot, &same_course, None), Some(ConflictKind::Course));

        let same_teacher = schedule(other_course, term, t(8, 0), t(9, 30), "C303");
        assert_eq!(
            conflict_kind(&slot, &same_teacher, Some(teacher)),
            Some(ConflictKind::Teacher)
        );
        assert_eq!(conflict_kind(&slot, &same_teacher, None), None);
    }

    #[test]
    fn test_touching_or_other_day_is_fine() {
        let term = Uuid::new_v4();
        let c = course(None);
        let slot = Slot {
            course: &c,
            term_id: term,
            day_of_week: 1,
            start_time: t(9, 0),
            end_time: t(10, 0),
            room: "A101",
        };

        let touching = schedule(Uuid::new_v4(), term, t(10, 0), t(11, 0), "A101");
        assert_eq!(conflict_kind(&slot, &touching, None), None);

        let mut other_day = schedule(Uuid::new_v4(), term, t(9, 0), t(10, 0), "A101");
        other_day.day_of_week = 2;
        assert_eq!(conflict_kind(&slot, &other_day, None), None);

        let other_term = schedule(Uuid::new_v4(), Uuid::new_v4(), t(9, 0), t(10, 0), "A101");
        assert_eq!(conflict_kind(&slot, &other_term, None), None);
    }
}
