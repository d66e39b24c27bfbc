use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::TeacherService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn delete_teacher(
    service: &TeacherService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if !storage.soft_delete_teacher(id).await? {
        return Err(EduSystemError::not_found("Teacher not found").into());
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted successfully")))
}

pub async fn restore_teacher(
    service: &TeacherService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let teacher = storage
        .get_teacher_by_id(id, true)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Teacher not found"))?;
    if !teacher.is_deleted() {
        return Err(EduSystemError::conflict("Teacher is not deleted").into());
    }

    storage.restore_teacher(id).await?;
    let restored = storage
        .get_teacher_by_id(id, false)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Teacher not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        restored,
        "Teacher restored successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_helpers::{anonymous_request, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_restore_only_deleted_teacher() {
        let inner = test_support::storage().await;
        let teacher = test_support::teacher(&inner, "T001").await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let request = anonymous_request(&storage);
        let service = TeacherService::new_lazy();

        assert_eq!(
            status_of(restore_teacher(&service, teacher.id, &request).await),
            409
        );

        assert_eq!(status_of(delete_teacher(&service, teacher.id, &request).await), 200);
        assert!(storage.get_teacher_by_id(teacher.id, false).await.unwrap().is_none());

        assert_eq!(
            status_of(restore_teacher(&service, teacher.id, &request).await),
            200
        );
        assert!(storage.get_teacher_by_id(teacher.id, false).await.unwrap().is_some());
    }
}
