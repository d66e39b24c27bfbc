//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub assessment: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    pub letter_grade: String,
    pub grade_points: f64,
    pub remarks: Option<String>,
    pub graded_by: Option<Uuid>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enrollments::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollments::Column::Id"
    )]
    Enrollment,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        use super::to_datetime;
        use crate::models::grades::entities::{Grade, LetterGrade};

        Grade {
            id: self.id,
            enrollment_id: self.enrollment_id,
            assessment: self.assessment,
            score: self.score,
            max_score: self.max_score,
            weight: self.weight,
            letter_grade: self
                .letter_grade
                .parse::<LetterGrade>()
                .unwrap_or(LetterGrade::F),
            grade_points: self.grade_points,
            remarks: self.remarks,
            graded_by: self.graded_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
