use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::StudentService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn delete_student(
    service: &StudentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if !storage.soft_delete_student(id).await? {
        return Err(EduSystemError::not_found("Student not found").into());
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
}

pub async fn restore_student(
    service: &StudentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let student = storage
        .get_student_by_id(id, true)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Student not found"))?;
    if !student.is_deleted() {
        return Err(EduSystemError::conflict("Student is not deleted").into());
    }

    storage.restore_student(id).await?;
    let restored = storage
        .get_student_by_id(id, false)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Student not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        restored,
        "Student restored successfully",
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
    async fn test_restore_only_deleted_student() {
        let inner = test_support::storage().await;
        let student = test_support::student(&inner, "S001").await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let request = anonymous_request(&storage);
        let service = StudentService::new_lazy();

        assert_eq!(
            status_of(restore_student(&service, student.id, &request).await),
            409
        );
        assert_eq!(
            status_of(restore_student(&service, Uuid::new_v4(), &request).await),
            404
        );

        assert_eq!(status_of(delete_student(&service, student.id, &request).await), 200);
        assert!(storage.get_student_by_id(student.id, false).await.unwrap().is_none());

        assert_eq!(
            status_of(restore_student(&service, student.id, &request).await),
            200
        );
        assert!(storage.get_student_by_id(student.id, false).await.unwrap().is_some());
    }
}
