//! 学期实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academic_terms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub enrollment_start: Option<Date>,
    pub enrollment_end: Option<Date>,
    pub is_current: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_term(self) -> crate::models::academic_terms::entities::AcademicTerm {
        use super::to_datetime;

        crate::models::academic_terms::entities::AcademicTerm {
            id: self.id,
            code: self.code,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            enrollment_start: self.enrollment_start,
            enrollment_end: self.enrollment_end,
            is_current: self.is_current,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
