//! 请求体中外键引用的存在性检查

use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

/// 档案关联的账号必须存在且角色匹配
pub async fn ensure_user_with_role(
    storage: &dyn Storage,
    user_id: Uuid,
    role: UserRole,
) -> Result<()> {
    match storage.get_user_by_id(user_id).await? {
        Some(user) if user.role == role => Ok(()),
        Some(user) => Err(EduSystemError::validation(format!(
            "user_id must reference a {role} account, got {}",
            user.role
        ))),
        None => Err(EduSystemError::validation("user_id does not exist")),
    }
}

pub async fn ensure_department_exists(storage: &dyn Storage, department_id: Uuid) -> Result<()> {
    if storage.get_department_by_id(department_id).await?.is_some() {
        Ok(())
    } else {
        Err(EduSystemError::validation("department_id does not exist"))
    }
}

/// 任课教师必须存在且未被删除
pub async fn ensure_active_teacher(storage: &dyn Storage, teacher_id: Uuid) -> Result<()> {
    if storage.get_teacher_by_id(teacher_id, false).await?.is_some() {
        Ok(())
    } else {
        Err(EduSystemError::validation(
            "teacher_id must reference an existing teacher",
        ))
    }
}
