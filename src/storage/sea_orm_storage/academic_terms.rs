use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::academic_terms::{ActiveModel, Column, Entity as AcademicTerms};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::schedules::{Column as ScheduleColumn, Entity as Schedules};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    academic_terms::{
        entities::AcademicTerm,
        requests::{AcademicTermListQuery, CreateAcademicTermRequest, UpdateAcademicTermRequest},
    },
};
use crate::utils::escape_like_pattern;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 以当前学期创建时，在同一事务内清除其他学期的标记
    pub async fn create_term_impl(&self, req: CreateAcademicTermRequest) -> Result<AcademicTerm> {
        let now = now_ts();
        let txn = self
            .db
            .begin()
            .await
            .map_err(map_db_err("开启事务失败"))?;

        if req.is_current {
            AcademicTerms::update_many()
                .col_expr(Column::IsCurrent, Expr::value(false))
                .col_expr(Column::UpdatedAt, Expr::value(now))
                .filter(Column::IsCurrent.eq(true))
                .exec(&txn)
                .await
                .map_err(map_db_err("清除当前学期失败"))?;
        }

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(req.code),
            name: Set(req.name.trim().to_string()),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            enrollment_start: Set(req.enrollment_start),
            enrollment_end: Set(req.enrollment_end),
            is_current: Set(req.is_current),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(map_db_err("创建学期失败"))?;

        txn.commit().await.map_err(map_db_err("提交事务失败"))?;

        Ok(result.into_term())
    }

    pub async fn get_term_by_id_impl(&self, id: Uuid) -> Result<Option<AcademicTerm>> {
        let result = AcademicTerms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询学期失败"))?;

        Ok(result.map(|m| m.into_term()))
    }

    pub async fn list_terms_with_pagination_impl(
        &self,
        query: AcademicTermListQuery,
    ) -> Result<PaginatedResponse<AcademicTerm>> {
        let mut select = AcademicTerms::find();

        if let Some(is_current) = query.is_current {
            select = select.filter(Column::IsCurrent.eq(is_current));
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

        // 最近的学期在前
        select = select.order_by_desc(Column::StartDate);

        let (items, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询学期列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_term()).collect(),
            pagination,
        })
    }

    pub async fn update_term_impl(
        &self,
        id: Uuid,
        update: UpdateAcademicTermRequest,
    ) -> Result<Option<AcademicTerm>> {
        let Some(existing) = AcademicTerms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询学期失败"))?
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
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(end_date);
        }
        if let Some(enrollment_start) = update.enrollment_start {
            model.enrollment_start = Set(enrollment_start);
        }
        if let Some(enrollment_end) = update.enrollment_end {
            model.enrollment_end = Set(enrollment_end);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新学期失败"))?;

        Ok(Some(updated.into_term()))
    }

    pub async fn delete_term_impl(&self, id: Uuid) -> Result<bool> {
        let result = AcademicTerms::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除学期失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 闭区间重叠：a.start <= b.end && b.start <= a.end
    pub async fn find_overlapping_term_impl(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<AcademicTerm>> {
        let mut select = AcademicTerms::find()
            .filter(Column::StartDate.lte(end))
            .filter(Column::EndDate.gte(start));

        if let Some(exclude_id) = exclude_id {
            select = select.filter(Column::Id.ne(exclude_id));
        }

        let result = select
            .order_by_asc(Column::StartDate)
            .one(&self.db)
            .await
            .map_err(map_db_err("检查学期日期冲突失败"))?;

        Ok(result.map(|m| m.into_term()))
    }

    /// 在同一事务内切换当前学期
    pub async fn activate_term_impl(&self, id: Uuid) -> Result<Option<AcademicTerm>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(map_db_err("开启事务失败"))?;

        let Some(existing) = AcademicTerms::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err("查询学期失败"))?
        else {
            return Ok(None);
        };

        let now = now_ts();
        AcademicTerms::update_many()
            .col_expr(Column::IsCurrent, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::IsCurrent.eq(true))
            .filter(Column::Id.ne(id))
            .exec(&txn)
            .await
            .map_err(map_db_err("清除当前学期失败"))?;

        let mut model: ActiveModel = existing.into();
        model.is_current = Set(true);
        model.updated_at = Set(now);
        let updated = model
            .update(&txn)
            .await
            .map_err(map_db_err("设置当前学期失败"))?;

        txn.commit().await.map_err(map_db_err("提交事务失败"))?;

        Ok(Some(updated.into_term()))
    }

    pub async fn get_current_term_impl(&self) -> Result<Option<AcademicTerm>> {
        let result = AcademicTerms::find()
            .filter(Column::IsCurrent.eq(true))
            .one(&self.db)
            .await
            .map_err(map_db_err("查询当前学期失败"))?;

        Ok(result.map(|m| m.into_term()))
    }

    pub async fn count_term_references_impl(&self, term_id: Uuid) -> Result<u64> {
        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::TermId.eq(term_id))
            .count(&self.db)
            .await
            .map_err(map_db_err("统计学期选课失败"))?;

        let schedules = Schedules::find()
            .filter(ScheduleColumn::TermId.eq(term_id))
            .count(&self.db)
            .await
            .map_err(map_db_err("统计学期课表失败"))?;

        Ok(enrollments + schedules)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{date, storage, term};
    use super::*;

    #[tokio::test]
    async fn test_overlap_detection_inclusive() {
        let storage = storage().await;
        let spring = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;

        // 边界当天重叠
        let hit = storage
            .find_overlapping_term_impl(date(2025, 6, 30), date(2025, 8, 31), None)
            .await
            .unwrap();
        assert_eq!(hit.map(|t| t.id), Some(spring.id));

        let miss = storage
            .find_overlapping_term_impl(date(2025, 7, 1), date(2025, 8, 31), None)
            .await
            .unwrap();
        assert!(miss.is_none());

        // 更新自身时排除自己
        let own = storage
            .find_overlapping_term_impl(date(2025, 2, 1), date(2025, 7, 15), Some(spring.id))
            .await
            .unwrap();
        assert!(own.is_none());
    }

    #[tokio::test]
    async fn test_activate_switches_current() {
        let storage = storage().await;
        let spring = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let fall = term(&storage, "2025F", date(2025, 9, 1), date(2026, 1, 15)).await;

        assert!(storage.get_current_term_impl().await.unwrap().is_none());

        storage.activate_term_impl(spring.id).await.unwrap();
        storage.activate_term_impl(fall.id).await.unwrap();

        let current = storage.get_current_term_impl().await.unwrap().unwrap();
        assert_eq!(current.id, fall.id);

        let spring = storage.get_term_by_id_impl(spring.id).await.unwrap().unwrap();
        assert!(!spring.is_current);

        assert!(
            storage
                .activate_term_impl(Uuid::new_v4())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_filter_current() {
        let storage = storage().await;
        let spring = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        term(&storage, "2025F", date(2025, 9, 1), date(2026, 1, 15)).await;
        storage.activate_term_impl(spring.id).await.unwrap();

        let page = storage
            .list_terms_with_pagination_impl(AcademicTermListQuery {
                is_current: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].code, "2025S");
    }

    #[tokio::test]
    async fn test_create_as_current_and_clear_window() {
        let storage = storage().await;
        let spring = term(&storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        storage.activate_term_impl(spring.id).await.unwrap();

        let fall = storage
            .create_term_impl(CreateAcademicTermRequest {
                code: "2025F".into(),
                name: "Fall 2025".into(),
                start_date: date(2025, 9, 1),
                end_date: date(2026, 1, 15),
                enrollment_start: Some(date(2025, 8, 1)),
                enrollment_end: Some(date(2025, 9, 10)),
                is_current: true,
            })
            .await
            .unwrap();
        assert!(fall.is_current);
        let current = storage.get_current_term_impl().await.unwrap().unwrap();
        assert_eq!(current.id, fall.id);
        let spring = storage.get_term_by_id_impl(spring.id).await.unwrap().unwrap();
        assert!(!spring.is_current);

        let cleared = storage
            .update_term_impl(
                fall.id,
                UpdateAcademicTermRequest {
                    enrollment_start: Some(None),
                    enrollment_end: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(cleared.enrollment_start.is_none());
        assert!(cleared.enrollment_end.is_none());
    }
}
