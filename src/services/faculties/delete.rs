use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::FacultyService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn delete_faculty(
    service: &FacultyService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.get_faculty_by_id(id).await?.is_none() {
        return Err(EduSystemError::not_found("Faculty not found").into());
    }

    let departments = storage.count_departments_in_faculty(id).await?;
    if departments > 0 {
        return Err(EduSystemError::conflict(format!(
            "Faculty still has {departments} department(s) and cannot be deleted"
        ))
        .into());
    }

    storage.delete_faculty(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Faculty deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::faculties::requests::CreateFacultyRequest;
    use crate::services::test_helpers::{anonymous_request, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_faculty_with_departments_is_kept() {
        let inner = test_support::storage().await;
        let department = test_support::department(&inner, "CS").await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let empty = storage
            .create_faculty(CreateFacultyRequest {
                code: "ARTS".into(),
                name: "Faculty of Arts".into(),
                description: None,
                dean_name: None,
            })
            .await
            .unwrap();
        let request = anonymous_request(&storage);
        let service = FacultyService::new_lazy();

        assert_eq!(
            status_of(delete_faculty(&service, department.faculty_id, &request).await),
            409
        );
        assert_eq!(status_of(delete_faculty(&service, empty.id, &request).await), 200);
        assert_eq!(status_of(delete_faculty(&service, empty.id, &request).await), 404);
    }
}
