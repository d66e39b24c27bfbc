use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::students::Entity as Students;
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    },
    enrollments::entities::{EnrollmentStatus, RosterEntry},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};
use uuid::Uuid;

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = now_ts();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(req.code),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            credits: Set(req.credits),
            department_id: Set(req.department_id),
            teacher_id: Set(req.teacher_id),
            capacity: Set(req.capacity),
            status: Set(req.status.unwrap_or(CourseStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建课程失败"))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<Course>> {
        let mut select = Courses::find_by_id(id);
        if !include_deleted {
            select = select.filter(Column::DeletedAt.is_null());
        }

        let result = select
            .one(&self.db)
            .await
            .map_err(map_db_err("查询课程失败"))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        let mut select = Courses::find();

        if !query.include_deleted.unwrap_or(false) {
            select = select.filter(Column::DeletedAt.is_null());
        }

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Code.contains(&escaped))
                    .add(Column::Name.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::Code);

        let (items, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询课程列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_course()).collect(),
            pagination,
        })
    }

    pub async fn update_course_impl(
        &self,
        id: Uuid,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let Some(existing) = Courses::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(map_db_err("查询课程失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新课程失败"))?;

        Ok(Some(updated.into_course()))
    }

    pub async fn soft_delete_course_impl(&self, id: Uuid) -> Result<bool> {
        let now = now_ts();
        let result = Courses::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除课程失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn restore_course_impl(&self, id: Uuid) -> Result<bool> {
        let result = Courses::update_many()
            .col_expr(Column::DeletedAt, Expr::value(Option::<i64>::None))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_not_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err("恢复课程失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 课程名单：未退课的选课记录连同学生信息
    pub async fn list_course_roster_impl(
        &self,
        course_id: Uuid,
        term_id: Option<Uuid>,
    ) -> Result<Vec<RosterEntry>> {
        let mut select = Enrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .filter(EnrollmentColumn::Status.ne(EnrollmentStatus::Dropped.to_string()));

        if let Some(term_id) = term_id {
            select = select.filter(EnrollmentColumn::TermId.eq(term_id));
        }

        let rows = select
            .order_by_asc(EnrollmentColumn::EnrolledAt)
            .find_also_related(Students)
            .all(&self.db)
            .await
            .map_err(map_db_err("查询课程名单失败"))?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, student)| {
                let student = student?.into_student();
                let enrollment = enrollment.into_enrollment();
                Some(RosterEntry {
                    enrollment_id: enrollment.id,
                    term_id: enrollment.term_id,
                    status: enrollment.status,
                    enrolled_at: enrollment.enrolled_at,
                    student,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{course, date, storage, student, teacher, term};
    use super::*;

    #[tokio::test]
    async fn test_filter_by_teacher_and_soft_delete() {
        let storage = storage().await;
        let t = teacher(&storage, "T001").await;
        let c = course(&storage, "CS101", 30).await;
        course(&storage, "CS102", 30).await;
        storage
            .update_course_impl(
                c.id,
                UpdateCourseRequest {
                    teacher_id: Some(t.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let taught = storage
            .list_courses_with_pagination_impl(CourseListQuery {
                teacher_id: Some(t.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(taught.items.len(), 1);
        assert_eq!(taught.items[0].code, "CS101");

        assert!(storage.soft_delete_course_impl(c.id).await.unwrap());
        assert!(storage.get_course_by_id_impl(c.id, false).await.unwrap().is_none());
        assert!(storage.restore_course_impl(c.id).await.unwrap());
        assert!(storage.get_course_by_id_impl(c.id, false).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_roster_excludes_dropped() {
        let storage = storage().await;
        let c = course(&storage, "CS101", 30).await;
        let spring = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let a = student(&storage, "S001").await;
        let b = student(&storage, "S002").await;

        storage
            .create_enrollment_impl(a.id, c.id, spring.id)
            .await
            .unwrap();
        let dropped = storage
            .create_enrollment_impl(b.id, c.id, spring.id)
            .await
            .unwrap();
        storage
            .update_enrollment_status_impl(dropped.id, EnrollmentStatus::Dropped)
            .await
            .unwrap();

        let roster = storage
            .list_course_roster_impl(c.id, Some(spring.id))
            .await
            .unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].student.id, a.id);

        let other_term = storage
            .list_course_roster_impl(c.id, Some(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(other_term.is_empty());
    }
}
