use serde::Deserialize;
use uuid::Uuid;

use super::entities::EnrollmentStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub term_id: Option<Uuid>,
    pub status: Option<EnrollmentStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnrollmentRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub term_id: Uuid,
}
