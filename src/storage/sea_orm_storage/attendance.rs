use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus},
        requests::{AttendanceListQuery, UpdateAttendanceRequest},
    },
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

impl SeaOrmStorage {
    pub async fn create_attendance_impl(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        date: NaiveDate,
        status: AttendanceStatus,
        remarks: Option<String>,
        recorded_by: Option<Uuid>,
    ) -> Result<AttendanceRecord> {
        let now = now_ts();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            course_id: Set(course_id),
            date: Set(date),
            status: Set(status.to_string()),
            remarks: Set(remarks),
            recorded_by: Set(recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建考勤记录失败"))?;

        Ok(result.into_attendance())
    }

    pub async fn get_attendance_by_id_impl(&self, id: Uuid) -> Result<Option<AttendanceRecord>> {
        let result = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询考勤记录失败"))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<AttendanceRecord>> {
        let mut select = Attendance::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(date_from) = query.date_from {
            select = select.filter(Column::Date.gte(date_from));
        }
        if let Some(date_to) = query.date_to {
            select = select.filter(Column::Date.lte(date_to));
        }

        select = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId);

        let (items, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询考勤列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_attendance()).collect(),
            pagination,
        })
    }

    pub async fn update_attendance_impl(
        &self,
        id: Uuid,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        let Some(existing) = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询考勤记录失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新考勤记录失败"))?;

        Ok(Some(updated.into_attendance()))
    }

    pub async fn delete_attendance_impl(&self, id: Uuid) -> Result<bool> {
        let result = Attendance::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除考勤记录失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_attendance_for_student_impl(
        &self,
        student_id: Uuid,
        course_id: Option<Uuid>,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find().filter(Column::StudentId.eq(student_id));
        if let Some(course_id) = course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let records = select
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(map_db_err("查询学生考勤失败"))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{course, date, storage, student};
    use super::*;
    use crate::errors::EduSystemError;
    use crate::models::attendance::entities::StudentAttendanceOverview;

    #[tokio::test]
    async fn test_one_record_per_day() {
        let storage = storage().await;
        let c = course(&storage, "CS101", 30).await;
        let s = student(&storage, "S001").await;
        let day = date(2025, 3, 3);

        storage
            .create_attendance_impl(s.id, c.id, day, AttendanceStatus::Present, None, None)
            .await
            .unwrap();
        let err = storage
            .create_attendance_impl(s.id, c.id, day, AttendanceStatus::Late, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EduSystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_date_range_filter_and_summary() {
        let storage = storage().await;
        let c = course(&storage, "CS101", 30).await;
        let s = student(&storage, "S001").await;

        let statuses = [
            AttendanceStatus::Present,
            AttendanceStatus::Late,
            AttendanceStatus::Absent,
            AttendanceStatus::Excused,
        ];
        for (i, status) in statuses.into_iter().enumerate() {
            storage
                .create_attendance_impl(s.id, c.id, date(2025, 3, 3 + i as u32), status, None, None)
                .await
                .unwrap();
        }

        let early = storage
            .list_attendance_with_pagination_impl(AttendanceListQuery {
                date_from: Some(date(2025, 3, 3)),
                date_to: Some(date(2025, 3, 4)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(early.items.len(), 2);

        let records = storage
            .list_attendance_for_student_impl(s.id, Some(c.id))
            .await
            .unwrap();
        let overview = StudentAttendanceOverview::from_records(s.id, &records);
        assert_eq!(overview.overall.total, 4);
        assert_eq!(overview.overall.attendance_rate, 0.5);
    }

    #[tokio::test]
    async fn test_update_status() {
        let storage = storage().await;
        let c = course(&storage, "CS101", 30).await;
        let s = student(&storage, "S001").await;
        let record = storage
            .create_attendance_impl(
                s.id,
                c.id,
                date(2025, 3, 3),
                AttendanceStatus::Absent,
                None,
                None,
            )
            .await
            .unwrap();

        let updated = storage
            .update_attendance_impl(
                record.id,
                UpdateAttendanceRequest {
                    status: Some(AttendanceStatus::Excused),
                    remarks: Some("medical note".into()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, AttendanceStatus::Excused);
        assert_eq!(updated.remarks.as_deref(), Some("medical note"));
    }
}
