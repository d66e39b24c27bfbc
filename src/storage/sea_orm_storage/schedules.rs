use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::courses::Column as CourseColumn;
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules, Relation};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    schedules::{
        entities::Schedule,
        requests::{CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    pub async fn create_schedule_impl(&self, req: CreateScheduleRequest) -> Result<Schedule> {
        let now = now_ts();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(req.course_id),
            term_id: Set(req.term_id),
            day_of_week: Set(req.day_of_week),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            room: Set(req.room.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建课表失败"))?;

        Ok(result.into_schedule())
    }

    pub async fn get_schedule_by_id_impl(&self, id: Uuid) -> Result<Option<Schedule>> {
        let result = Schedules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询课表失败"))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    pub async fn list_schedules_with_pagination_impl(
        &self,
        query: ScheduleListQuery,
    ) -> Result<PaginatedResponse<Schedule>> {
        let mut select = Schedules::find();

        if let Some(term_id) = query.term_id {
            select = select.filter(Column::TermId.eq(term_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(day_of_week) = query.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day_of_week as i32));
        }
        if let Some(ref room) = query.room
            && !room.trim().is_empty()
        {
            select = select.filter(Column::Room.eq(room.trim()));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select
                .join(JoinType::InnerJoin, Relation::Course.def())
                .filter(CourseColumn::TeacherId.eq(teacher_id));
        }

        select = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime);

        let (items, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询课表列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_schedule()).collect(),
            pagination,
        })
    }

    pub async fn update_schedule_impl(
        &self,
        id: Uuid,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>> {
        let Some(existing) = Schedules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询课表失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(term_id) = update.term_id {
            model.term_id = Set(term_id);
        }
        if let Some(day_of_week) = update.day_of_week {
            model.day_of_week = Set(day_of_week);
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time);
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time);
        }
        if let Some(room) = update.room {
            model.room = Set(room.trim().to_string());
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新课表失败"))?;

        Ok(Some(updated.into_schedule()))
    }

    pub async fn delete_schedule_impl(&self, id: Uuid) -> Result<bool> {
        let result = Schedules::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除课表失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_schedules_for_day_impl(
        &self,
        term_id: Uuid,
        day_of_week: i32,
    ) -> Result<Vec<Schedule>> {
        let rows = Schedules::find()
            .filter(Column::TermId.eq(term_id))
            .filter(Column::DayOfWeek.eq(day_of_week))
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(map_db_err("查询当日课表失败"))?;

        Ok(rows.into_iter().map(|m| m.into_schedule()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{course, date, storage, teacher, term};
    use super::*;
    use crate::models::courses::requests::UpdateCourseRequest;
    use chrono::NaiveTime;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_day_listing_and_teacher_filter() {
        let storage = storage().await;
        let t = teacher(&storage, "T001").await;
        let taught = course(&storage, "CS101", 30).await;
        let other = course(&storage, "CS102", 30).await;
        storage
            .update_course_impl(
                taught.id,
                UpdateCourseRequest {
                    teacher_id: Some(t.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let spring = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;

        for (course_id, day) in [(taught.id, 0), (other.id, 0), (taught.id, 2)] {
            storage
                .create_schedule_impl(CreateScheduleRequest {
                    course_id,
                    term_id: spring.id,
                    day_of_week: day,
                    start_time: time(9, 0),
                    end_time: time(10, 30),
                    room: "A101".into(),
                })
                .await
                .unwrap();
        }

        let monday = storage
            .list_schedules_for_day_impl(spring.id, 0)
            .await
            .unwrap();
        assert_eq!(monday.len(), 2);

        let by_teacher = storage
            .list_schedules_with_pagination_impl(ScheduleListQuery {
                teacher_id: Some(t.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_teacher.items.len(), 2);
        assert!(by_teacher.items.iter().all(|s| s.course_id == taught.id));
    }
}
