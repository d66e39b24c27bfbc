use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    teachers::{
        entities::{Teacher, TeacherStatus},
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};
use uuid::Uuid;

impl SeaOrmStorage {
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = now_ts();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(req.user_id),
            employee_number: Set(req.employee_number),
            first_name: Set(req.first_name.trim().to_string()),
            last_name: Set(req.last_name.trim().to_string()),
            email: Set(req.email),
            phone: Set(req.phone),
            department_id: Set(req.department_id),
            title: Set(req.title),
            hire_date: Set(req.hire_date),
            status: Set(req.status.unwrap_or(TeacherStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建教师失败"))?;

        Ok(result.into_teacher())
    }

    pub async fn get_teacher_by_id_impl(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<Teacher>> {
        let mut select = Teachers::find_by_id(id);
        if !include_deleted {
            select = select.filter(Column::DeletedAt.is_null());
        }

        let result = select
            .one(&self.db)
            .await
            .map_err(map_db_err("查询教师失败"))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn get_teacher_by_user_id_impl(&self, user_id: Uuid) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(map_db_err("查询教师失败"))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>> {
        let mut select = Teachers::find();

        if !query.include_deleted.unwrap_or(false) {
            select = select.filter(Column::DeletedAt.is_null());
        }

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
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
                    .add(Column::EmployeeNumber.contains(&escaped))
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        select = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName);

        let (items, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询教师列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_teacher()).collect(),
            pagination,
        })
    }

    pub async fn update_teacher_impl(
        &self,
        id: Uuid,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let Some(existing) = Teachers::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(map_db_err("查询教师失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(user_id) = update.user_id {
            model.user_id = Set(Some(user_id));
        }
        if let Some(employee_number) = update.employee_number {
            model.employee_number = Set(employee_number);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name.trim().to_string());
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name.trim().to_string());
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(title) = update.title {
            model.title = Set(Some(title));
        }
        if let Some(hire_date) = update.hire_date {
            model.hire_date = Set(Some(hire_date));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新教师失败"))?;

        Ok(Some(updated.into_teacher()))
    }

    /// 软删除，只对未删除的记录生效
    pub async fn soft_delete_teacher_impl(&self, id: Uuid) -> Result<bool> {
        let now = now_ts();
        let result = Teachers::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除教师失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 恢复，只对已删除的记录生效
    pub async fn restore_teacher_impl(&self, id: Uuid) -> Result<bool> {
        let result = Teachers::update_many()
            .col_expr(Column::DeletedAt, Expr::value(Option::<i64>::None))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_not_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err("恢复教师失败"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{storage, teacher};
    use super::*;

    #[tokio::test]
    async fn test_soft_delete_and_restore() {
        let storage = storage().await;
        let t = teacher(&storage, "T001").await;

        assert!(storage.soft_delete_teacher_impl(t.id).await.unwrap());
        // 重复删除不生效
        assert!(!storage.soft_delete_teacher_impl(t.id).await.unwrap());

        assert!(storage.get_teacher_by_id_impl(t.id, false).await.unwrap().is_none());
        let deleted = storage.get_teacher_by_id_impl(t.id, true).await.unwrap().unwrap();
        assert!(deleted.is_deleted());

        let listed = storage
            .list_teachers_with_pagination_impl(TeacherListQuery::default())
            .await
            .unwrap();
        assert!(listed.items.is_empty());

        let listed = storage
            .list_teachers_with_pagination_impl(TeacherListQuery {
                include_deleted: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.items.len(), 1);

        assert!(storage.restore_teacher_impl(t.id).await.unwrap());
        assert!(!storage.restore_teacher_impl(t.id).await.unwrap());
        assert!(storage.get_teacher_by_id_impl(t.id, false).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_deleted_teacher_returns_none() {
        let storage = storage().await;
        let t = teacher(&storage, "T001").await;
        storage.soft_delete_teacher_impl(t.id).await.unwrap();

        let result = storage
            .update_teacher_impl(
                t.id,
                UpdateTeacherRequest {
                    title: Some("Professor".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
