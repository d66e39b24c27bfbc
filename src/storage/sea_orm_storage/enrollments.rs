use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::courses::Entity as Courses;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{EduSystemError, Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus, EnrollmentWithCourse},
        requests::EnrollmentListQuery,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

impl SeaOrmStorage {
    pub async fn create_enrollment_impl(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        term_id: Uuid,
    ) -> Result<Enrollment> {
        let now = now_ts();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            course_id: Set(course_id),
            term_id: Set(term_id),
            status: Set(EnrollmentStatus::Enrolled.to_string()),
            enrolled_at: Set(now),
            dropped_at: Set(None),
            completed_at: Set(None),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建选课记录失败"))?;

        Ok(result.into_enrollment())
    }

    pub async fn get_enrollment_by_id_impl(&self, id: Uuid) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询选课记录失败"))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn list_enrollments_with_pagination_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>> {
        let mut select = Enrollments::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(term_id) = query.term_id {
            select = select.filter(Column::TermId.eq(term_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::EnrolledAt);

        let (items, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询选课列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_enrollment()).collect(),
            pagination,
        })
    }

    /// 在同一事务内检查重复选课与课程容量后写入
    ///
    /// 课程行加排他锁，串行化同一课程的并发选课（SQLite 本身按库串行写入）。
    pub async fn enroll_with_capacity_impl(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        term_id: Uuid,
        capacity: u64,
    ) -> Result<Enrollment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(map_db_err("开启事务失败"))?;

        Courses::find_by_id(course_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(map_db_err("锁定课程失败"))?
            .ok_or_else(|| EduSystemError::validation("course_id does not exist"))?;

        if find_active_enrollment(&txn, student_id, course_id, term_id)
            .await?
            .is_some()
        {
            return Err(EduSystemError::conflict(
                "Student is already enrolled in this course for this term",
            ));
        }

        if count_active_enrollments(&txn, course_id, term_id).await? >= capacity {
            return Err(EduSystemError::conflict("Course is full"));
        }

        let now = now_ts();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            course_id: Set(course_id),
            term_id: Set(term_id),
            status: Set(EnrollmentStatus::Enrolled.to_string()),
            enrolled_at: Set(now),
            dropped_at: Set(None),
            completed_at: Set(None),
            updated_at: Set(now),
        };
        let result = model
            .insert(&txn)
            .await
            .map_err(map_db_err("创建选课记录失败"))?;

        txn.commit().await.map_err(map_db_err("提交事务失败"))?;

        Ok(result.into_enrollment())
    }

    /// enrolled 或 completed 都视为有效
    pub async fn has_active_enrollment_in_course_impl(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool> {
        let count = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Status.ne(EnrollmentStatus::Dropped.to_string()))
            .count(&self.db)
            .await
            .map_err(map_db_err("查询选课记录失败"))?;

        Ok(count > 0)
    }

    pub async fn update_enrollment_status_impl(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        let Some(existing) = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询选课记录失败"))?
        else {
            return Ok(None);
        };

        let now = now_ts();
        let mut model: ActiveModel = existing.into();
        model.status = Set(status.to_string());
        match status {
            EnrollmentStatus::Dropped => model.dropped_at = Set(Some(now)),
            EnrollmentStatus::Completed => model.completed_at = Set(Some(now)),
            EnrollmentStatus::Enrolled => {}
        }
        model.updated_at = Set(now);

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新选课状态失败"))?;

        Ok(Some(updated.into_enrollment()))
    }

    pub async fn delete_enrollment_impl(&self, id: Uuid) -> Result<bool> {
        let result = Enrollments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除选课记录失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生的全部选课及课程信息（包括已软删除的课程）
    pub async fn list_student_enrollments_impl(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<EnrollmentWithCourse>> {
        let rows = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::EnrolledAt)
            .find_also_related(Courses)
            .all(&self.db)
            .await
            .map_err(map_db_err("查询学生选课失败"))?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                Some(EnrollmentWithCourse {
                    course: course?.into_course(),
                    enrollment: enrollment.into_enrollment(),
                })
            })
            .collect())
    }
}

/// 同一学生、课程、学期下未退课（enrolled 或 completed）的记录
async fn find_active_enrollment<C: ConnectionTrait>(
    conn: &C,
    student_id: Uuid,
    course_id: Uuid,
    term_id: Uuid,
) -> Result<Option<Enrollment>> {
    let result = Enrollments::find()
        .filter(Column::StudentId.eq(student_id))
        .filter(Column::CourseId.eq(course_id))
        .filter(Column::TermId.eq(term_id))
        .filter(Column::Status.ne(EnrollmentStatus::Dropped.to_string()))
        .one(conn)
        .await
        .map_err(map_db_err("查询选课记录失败"))?;

    Ok(result.map(|m| m.into_enrollment()))
}

/// 课程在该学期占用的名额，已结课的记录同样占位
async fn count_active_enrollments<C: ConnectionTrait>(
    conn: &C,
    course_id: Uuid,
    term_id: Uuid,
) -> Result<u64> {
    Enrollments::find()
        .filter(Column::CourseId.eq(course_id))
        .filter(Column::TermId.eq(term_id))
        .filter(Column::Status.ne(EnrollmentStatus::Dropped.to_string()))
        .count(conn)
        .await
        .map_err(map_db_err("统计选课人数失败"))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{course, date, storage, student, term};
    use super::*;

    #[tokio::test]
    async fn test_active_enrollment_tracking() {
        let storage = storage().await;
        let c = course(&storage, "CS101", 30).await;
        let t = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let s = student(&storage, "S001").await;

        let e = storage.create_enrollment_impl(s.id, c.id, t.id).await.unwrap();
        assert_eq!(e.status, EnrollmentStatus::Enrolled);
        assert_eq!(count_active_enrollments(&storage.db, c.id, t.id).await.unwrap(), 1);
        assert!(
            find_active_enrollment(&storage.db, s.id, c.id, t.id)
                .await
                .unwrap()
                .is_some()
        );

        let dropped = storage
            .update_enrollment_status_impl(e.id, EnrollmentStatus::Dropped)
            .await
            .unwrap()
            .unwrap();
        assert!(dropped.dropped_at.is_some());
        assert_eq!(count_active_enrollments(&storage.db, c.id, t.id).await.unwrap(), 0);
        assert!(
            !storage
                .has_active_enrollment_in_course_impl(s.id, c.id)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_completed_counts_as_active_for_attendance() {
        let storage = storage().await;
        let c = course(&storage, "CS101", 30).await;
        let t = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let s = student(&storage, "S001").await;

        let e = storage.create_enrollment_impl(s.id, c.id, t.id).await.unwrap();
        let completed = storage
            .update_enrollment_status_impl(e.id, EnrollmentStatus::Completed)
            .await
            .unwrap()
            .unwrap();
        assert!(completed.completed_at.is_some());
        assert!(
            storage
                .has_active_enrollment_in_course_impl(s.id, c.id)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_enroll_with_capacity_counts_completed() {
        let storage = storage().await;
        let c = course(&storage, "CS101", 2).await;
        let t = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let first = student(&storage, "S001").await;
        let second = student(&storage, "S002").await;
        let third = student(&storage, "S003").await;

        let e = storage
            .enroll_with_capacity_impl(first.id, c.id, t.id, 2)
            .await
            .unwrap();
        storage
            .update_enrollment_status_impl(e.id, EnrollmentStatus::Completed)
            .await
            .unwrap();

        // 已结课的记录仍算作有效选课
        let err = storage
            .enroll_with_capacity_impl(first.id, c.id, t.id, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, EduSystemError::Conflict(_)));

        storage
            .enroll_with_capacity_impl(second.id, c.id, t.id, 2)
            .await
            .unwrap();
        let err = storage
            .enroll_with_capacity_impl(third.id, c.id, t.id, 2)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Course is full");

        let err = storage
            .enroll_with_capacity_impl(third.id, Uuid::new_v4(), t.id, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, EduSystemError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_student_is_rejected() {
        let storage = storage().await;
        let c = course(&storage, "CS101", 30).await;
        let t = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;

        let err = storage
            .create_enrollment_impl(Uuid::new_v4(), c.id, t.id)
            .await
            .unwrap_err();
        assert!(matches!(err, EduSystemError::Validation(_)));
    }

    #[tokio::test]
    async fn test_student_enrollments_with_course() {
        let storage = storage().await;
        let c = course(&storage, "CS101", 30).await;
        let t = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let s = student(&storage, "S001").await;
        storage.create_enrollment_impl(s.id, c.id, t.id).await.unwrap();

        let list = storage.list_student_enrollments_impl(s.id).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].course.code, "CS101");
    }
}
