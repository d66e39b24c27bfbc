use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::departments::{Column as DepartmentColumn, Entity as Departments};
use crate::entity::faculties::{ActiveModel, Column, Entity as Faculties};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    faculties::{
        entities::Faculty,
        requests::{CreateFacultyRequest, FacultyListQuery, UpdateFacultyRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    pub async fn create_faculty_impl(&self, req: CreateFacultyRequest) -> Result<Faculty> {
        let now = now_ts();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(req.code),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            dean_name: Set(req.dean_name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建学院失败"))?;

        Ok(result.into_faculty())
    }

    pub async fn get_faculty_by_id_impl(&self, id: Uuid) -> Result<Option<Faculty>> {
        let result = Faculties::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询学院失败"))?;

        Ok(result.map(|m| m.into_faculty()))
    }

    pub async fn list_faculties_with_pagination_impl(
        &self,
        query: FacultyListQuery,
    ) -> Result<PaginatedResponse<Faculty>> {
        let mut select = Faculties::find();

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
            fetch_page(&self.db, select, &query.pagination, "查询学院列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_faculty()).collect(),
            pagination,
        })
    }

    pub async fn update_faculty_impl(
        &self,
        id: Uuid,
        update: UpdateFacultyRequest,
    ) -> Result<Option<Faculty>> {
        let Some(existing) = Faculties::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询学院失败"))?
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
        if let Some(dean_name) = update.dean_name {
            model.dean_name = Set(Some(dean_name));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新学院失败"))?;

        Ok(Some(updated.into_faculty()))
    }

    pub async fn delete_faculty_impl(&self, id: Uuid) -> Result<bool> {
        let result = Faculties::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除学院失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_departments_in_faculty_impl(&self, faculty_id: Uuid) -> Result<u64> {
        Departments::find()
            .filter(DepartmentColumn::FacultyId.eq(faculty_id))
            .count(&self.db)
            .await
            .map_err(map_db_err("统计院系数量失败"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{department, storage};
    use super::*;
    use crate::errors::EduSystemError;

    fn new_faculty(code: &str) -> CreateFacultyRequest {
        CreateFacultyRequest {
            code: code.to_string(),
            name: format!("Faculty of {code}"),
            description: None,
            dean_name: None,
        }
    }

    #[tokio::test]
    async fn test_faculty_crud() {
        let storage = storage().await;
        let faculty = storage.create_faculty_impl(new_faculty("ENG")).await.unwrap();

        let updated = storage
            .update_faculty_impl(
                faculty.id,
                UpdateFacultyRequest {
                    dean_name: Some("Dr. Turing".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.dean_name.as_deref(), Some("Dr. Turing"));
        assert_eq!(updated.code, "ENG");

        assert!(storage.delete_faculty_impl(faculty.id).await.unwrap());
        assert!(storage.get_faculty_by_id_impl(faculty.id).await.unwrap().is_none());
        assert!(
            storage
                .update_faculty_impl(faculty.id, UpdateFacultyRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_code_is_conflict() {
        let storage = storage().await;
        storage.create_faculty_impl(new_faculty("SCI")).await.unwrap();
        let err = storage
            .create_faculty_impl(new_faculty("SCI"))
            .await
            .unwrap_err();
        assert!(matches!(err, EduSystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_count_departments() {
        let storage = storage().await;
        let dept = department(&storage, "CS").await;
        assert_eq!(
            storage
                .count_departments_in_faculty_impl(dept.faculty_id)
                .await
                .unwrap(),
            1
        );
    }
}
