use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let now = now_ts();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            faculty_id: Set(req.faculty_id),
            code: Set(req.code),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            head_teacher_id: Set(req.head_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建院系失败"))?;

        Ok(result.into_department())
    }

    pub async fn get_department_by_id_impl(&self, id: Uuid) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询院系失败"))?;

        Ok(result.map(|m| m.into_department()))
    }

    pub async fn list_departments_with_pagination_impl(
        &self,
        query: DepartmentListQuery,
    ) -> Result<PaginatedResponse<Department>> {
        let mut select = Departments::find();

        if let Some(faculty_id) = query.faculty_id {
            select = select.filter(Column::FacultyId.eq(faculty_id));
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
            fetch_page(&self.db, select, &query.pagination, "查询院系列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_department()).collect(),
            pagination,
        })
    }

    pub async fn update_department_impl(
        &self,
        id: Uuid,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        let Some(existing) = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询院系失败"))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(faculty_id) = update.faculty_id {
            model.faculty_id = Set(faculty_id);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(head_teacher_id) = update.head_teacher_id {
            model.head_teacher_id = Set(Some(head_teacher_id));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新院系失败"))?;

        Ok(Some(updated.into_department()))
    }

    pub async fn delete_department_impl(&self, id: Uuid) -> Result<bool> {
        let result = Departments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除院系失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 未软删除的学生、教师、课程引用数之和
    pub async fn count_department_references_impl(&self, department_id: Uuid) -> Result<u64> {
        let students = Students::find()
            .filter(StudentColumn::DepartmentId.eq(department_id))
            .filter(StudentColumn::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(map_db_err("统计院系学生失败"))?;

        let teachers = Teachers::find()
            .filter(TeacherColumn::DepartmentId.eq(department_id))
            .filter(TeacherColumn::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(map_db_err("统计院系教师失败"))?;

        let courses = Courses::find()
            .filter(CourseColumn::DepartmentId.eq(department_id))
            .filter(CourseColumn::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(map_db_err("统计院系课程失败"))?;

        Ok(students + teachers + courses)
    }
}
