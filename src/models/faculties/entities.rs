use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 学院
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub dean_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
