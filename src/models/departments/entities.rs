use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 院系
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub head_teacher_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
