use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    grades::{
        entities::{Grade, LetterGrade, percentage},
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};
use uuid::Uuid;

fn letter_for(score: f64, max_score: f64) -> LetterGrade {
    LetterGrade::from_percentage(percentage(score, max_score))
}

impl SeaOrmStorage {
    pub async fn create_grade_impl(
        &self,
        req: CreateGradeRequest,
        graded_by: Option<Uuid>,
    ) -> Result<Grade> {
        let now = now_ts();
        let max_score = req.max_score_or_default();
        let weight = req.weight_or_default();
        let letter = letter_for(req.score, max_score);

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            enrollment_id: Set(req.enrollment_id),
            assessment: Set(req.assessment.trim().to_string()),
            score: Set(req.score),
            max_score: Set(max_score),
            weight: Set(weight),
            letter_grade: Set(letter.to_string()),
            grade_points: Set(letter.grade_points()),
            remarks: Set(req.remarks),
            graded_by: Set(graded_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建成绩失败"))?;

        Ok(result.into_grade())
    }

    pub async fn get_grade_by_id_impl(&self, id: Uuid) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询成绩失败"))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<PaginatedResponse<Grade>> {
        let mut select = Grades::find();

        if let Some(enrollment_id) = query.enrollment_id {
            select = select.filter(Column::EnrollmentId.eq(enrollment_id));
        }

        // 学生、课程、学期条件需要关联选课表
        if query.student_id.is_some() || query.course_id.is_some() || query.term_id.is_some() {
            select = select.join(
                JoinType::InnerJoin,
                crate::entity::grades::Relation::Enrollment.def(),
            );
            if let Some(student_id) = query.student_id {
                select = select.filter(EnrollmentColumn::StudentId.eq(student_id));
            }
            if let Some(course_id) = query.course_id {
                select = select.filter(EnrollmentColumn::CourseId.eq(course_id));
            }
            if let Some(term_id) = query.term_id {
                select = select.filter(EnrollmentColumn::TermId.eq(term_id));
            }
        }

        select = select.order_by_desc(Column::CreatedAt);

        let (items, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询成绩列表失败").await?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_grade()).collect(),
            pagination,
        })
    }

    /// 更新成绩，分数变化时重新计算等级
    pub async fn update_grade_impl(
        &self,
        id: Uuid,
        update: UpdateGradeRequest,
        graded_by: Option<Uuid>,
    ) -> Result<Option<Grade>> {
        let Some(existing) = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询成绩失败"))?
        else {
            return Ok(None);
        };

        let score = update.score.unwrap_or(existing.score);
        let max_score = update.max_score.unwrap_or(existing.max_score);
        let letter = letter_for(score, max_score);

        let mut model: ActiveModel = existing.into();
        if let Some(assessment) = update.assessment {
            model.assessment = Set(assessment.trim().to_string());
        }
        if let Some(weight) = update.weight {
            model.weight = Set(weight);
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }
        if graded_by.is_some() {
            model.graded_by = Set(graded_by);
        }
        model.score = Set(score);
        model.max_score = Set(max_score);
        model.letter_grade = Set(letter.to_string());
        model.grade_points = Set(letter.grade_points());
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新成绩失败"))?;

        Ok(Some(updated.into_grade()))
    }

    pub async fn delete_grade_impl(&self, id: Uuid) -> Result<bool> {
        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除成绩失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生全部选课下的成绩，用于成绩单
    pub async fn list_grades_for_student_impl(&self, student_id: Uuid) -> Result<Vec<Grade>> {
        let enrollment_ids: Vec<Uuid> = Enrollments::find()
            .select_only()
            .column(EnrollmentColumn::Id)
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(map_db_err("查询学生选课失败"))?;

        if enrollment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let grades = Grades::find()
            .filter(Column::EnrollmentId.is_in(enrollment_ids))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err("查询学生成绩失败"))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{course, date, storage, student, term};
    use super::*;
    use crate::errors::EduSystemError;
    use crate::models::enrollments::entities::Enrollment;

    async fn enrollment(storage: &SeaOrmStorage) -> Enrollment {
        let c = course(storage, "CS101", 30).await;
        let t = term(storage, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let s = student(storage, "S001").await;
        storage.create_enrollment_impl(s.id, c.id, t.id).await.unwrap()
    }

    fn midterm(enrollment_id: Uuid, score: f64) -> CreateGradeRequest {
        CreateGradeRequest {
            enrollment_id,
            assessment: "midterm".into(),
            score,
            max_score: None,
            weight: Some(40.0),
            remarks: None,
        }
    }

    #[tokio::test]
    async fn test_letter_grade_computed() {
        let storage = storage().await;
        let e = enrollment(&storage).await;

        let grade = storage.create_grade_impl(midterm(e.id, 85.0), None).await.unwrap();
        assert_eq!(grade.letter_grade, LetterGrade::B);
        assert_eq!(grade.grade_points, 3.0);
        assert_eq!(grade.max_score, 100.0);

        let updated = storage
            .update_grade_impl(
                grade.id,
                UpdateGradeRequest {
                    score: Some(92.0),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.letter_grade, LetterGrade::A);
        assert_eq!(updated.weight, 40.0);
    }

    #[tokio::test]
    async fn test_duplicate_assessment_is_conflict() {
        let storage = storage().await;
        let e = enrollment(&storage).await;

        storage.create_grade_impl(midterm(e.id, 70.0), None).await.unwrap();
        let err = storage
            .create_grade_impl(midterm(e.id, 75.0), None)
            .await
            .unwrap_err();
        assert!(matches!(err, EduSystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_filters_through_enrollment() {
        let storage = storage().await;
        let e = enrollment(&storage).await;
        storage.create_grade_impl(midterm(e.id, 70.0), None).await.unwrap();

        let by_student = storage
            .list_grades_with_pagination_impl(GradeListQuery {
                student_id: Some(e.student_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_student.items.len(), 1);

        let other_course = storage
            .list_grades_with_pagination_impl(GradeListQuery {
                course_id: Some(Uuid::new_v4()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(other_course.items.is_empty());

        let transcript = storage.list_grades_for_student_impl(e.student_id).await.unwrap();
        assert_eq!(transcript.len(), 1);
    }
}
