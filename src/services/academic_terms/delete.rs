use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::AcademicTermService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn delete_term(
    service: &AcademicTermService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if storage.get_term_by_id(id).await?.is_none() {
        return Err(EduSystemError::not_found("Academic term not found").into());
    }

    if storage.count_term_references(id).await? > 0 {
        return Err(EduSystemError::conflict(
            "Academic term has enrollments or schedules and cannot be deleted",
        )
        .into());
    }

    storage.delete_term(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Academic term deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_helpers::{anonymous_request, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{self, date};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_referenced_term_is_kept() {
        let inner = test_support::storage().await;
        let used = test_support::term(&inner, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let unused = test_support::term(&inner, "2025F", date(2025, 9, 1), date(2026, 1, 15)).await;
        let course = test_support::course(&inner, "CS101", 10).await;
        let student = test_support::student(&inner, "S001").await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        storage
            .create_enrollment(student.id, course.id, used.id)
            .await
            .unwrap();
        let request = anonymous_request(&storage);
        let service = AcademicTermService::new_lazy();

        assert_eq!(status_of(delete_term(&service, used.id, &request).await), 409);
        assert!(storage.get_term_by_id(used.id).await.unwrap().is_some());

        assert_eq!(status_of(delete_term(&service, unused.id, &request).await), 200);
        assert_eq!(status_of(delete_term(&service, unused.id, &request).await), 404);
    }
}
