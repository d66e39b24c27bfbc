use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};
use uuid::Uuid;

impl SeaOrmStorage {
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = now_ts();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(req.user_id),
            student_number: Set(req.student_number),
            first_name: Set(req.first_name.trim().to_string()),
            last_name: Set(req.last_name.trim().to_string()),
            email: Set(req.email),
            date_of_birth: Set(req.date_of_birth),
            gender: Set(req.gender.map(|g| g.to_string())),
            phone: Set(req.phone),
            address: Set(req.address),
            department_id: Set(req.department_id),
            enrollment_date: Set(req.enrollment_date),
            status: Set(req.status.unwrap_or(StudentStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建学生失败"))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<Student>> {
        let mut select = Students::find_by_id(id);
        if !include_deleted {
            select = select.filter(Column::DeletedAt.is_null());
        }

        let result = select
            .one(&self.db)
            .await
            .map_err(map_db_err("查询学生失败"))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: Uuid) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(map_db_err("查询学生失败"))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        let mut select = Students::find();

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
                    .add(Column::StudentNumber.contains(&escaped))
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::StudentNumber);

        let (items, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询学生列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_student()).collect(),
            pagination,
        })
    }

    pub async fn update_student_impl(
        &self,
        id: Uuid,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(map_db_err("查询学生失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(user_id) = update.user_id {
            model.user_id = Set(Some(user_id));
        }
        if let Some(student_number) = update.student_number {
            model.student_number = Set(student_number);
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
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(Some(date_of_birth));
        }
        if let Some(gender) = update.gender {
            model.gender = Set(Some(gender.to_string()));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(enrollment_date) = update.enrollment_date {
            model.enrollment_date = Set(Some(enrollment_date));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新学生失败"))?;

        Ok(Some(updated.into_student()))
    }

    pub async fn soft_delete_student_impl(&self, id: Uuid) -> Result<bool> {
        let now = now_ts();
        let result = Students::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除学生失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn restore_student_impl(&self, id: Uuid) -> Result<bool> {
        let result = Students::update_many()
            .col_expr(Column::DeletedAt, Expr::value(Option::<i64>::None))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_not_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err("恢复学生失败"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{storage, student};
    use super::*;
    use crate::errors::EduSystemError;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};

    #[tokio::test]
    async fn test_lookup_by_user() {
        let storage = storage().await;
        let user = storage
            .create_user_impl(CreateUserRequest {
                username: "grace".into(),
                email: "grace@student.edu".into(),
                password: "hashed".into(),
                role: UserRole::Student,
                display_name: None,
            })
            .await
            .unwrap();
        let s = student(&storage, "S001").await;
        storage
            .update_student_impl(
                s.id,
                UpdateStudentRequest {
                    user_id: Some(user.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let found = storage.get_student_by_user_id_impl(user.id).await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(s.id));

        storage.soft_delete_student_impl(s.id).await.unwrap();
        assert!(storage.get_student_by_user_id_impl(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_student_number() {
        let storage = storage().await;
        student(&storage, "S001").await;
        let err = storage
            .create_student_impl(CreateStudentRequest {
                user_id: None,
                student_number: "S001".into(),
                first_name: "Alan".into(),
                last_name: "Turing".into(),
                email: "alan@student.edu".into(),
                date_of_birth: None,
                gender: None,
                phone: None,
                address: None,
                department_id: None,
                enrollment_date: None,
                status: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EduSystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_search_and_status_filter() {
        let storage = storage().await;
        let s = student(&storage, "S001").await;
        student(&storage, "S002").await;
        storage
            .update_student_impl(
                s.id,
                UpdateStudentRequest {
                    status: Some(StudentStatus::Graduated),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let graduated = storage
            .list_students_with_pagination_impl(StudentListQuery {
                status: Some(StudentStatus::Graduated),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(graduated.items.len(), 1);

        let searched = storage
            .list_students_with_pagination_impl(StudentListQuery {
                search: Some("S002".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].student_number, "S002");
    }
}
