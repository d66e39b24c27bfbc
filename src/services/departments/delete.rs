use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::DepartmentService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn delete_department(
    service: &DepartmentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.get_department_by_id(id).await?.is_none() {
        return Err(EduSystemError::not_found("Department not found").into());
    }

    let references = storage.count_department_references(id).await?;
    if references > 0 {
        return Err(EduSystemError::conflict(format!(
            "Department is still referenced by {references} student(s), teacher(s) or course(s)"
        ))
        .into());
    }

    storage.delete_department(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Department deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::UpdateStudentRequest;
    use crate::services::test_helpers::{anonymous_request, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_department_with_students_is_kept() {
        let inner = test_support::storage().await;
        let department = test_support::department(&inner, "CS").await;
        let student = test_support::student(&inner, "S001").await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        storage
            .update_student(
                student.id,
                UpdateStudentRequest {
                    department_id: Some(department.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let request = anonymous_request(&storage);
        let service = DepartmentService::new_lazy();

        assert_eq!(
            status_of(delete_department(&service, department.id, &request).await),
            409
        );

        // 软删除后的学生不再占用
        storage.soft_delete_student(student.id).await.unwrap();
        assert_eq!(
            status_of(delete_department(&service, department.id, &request).await),
            200
        );
    }
}
