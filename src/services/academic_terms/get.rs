use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::AcademicTermService;
use crate::errors::EduSystemError;
use crate::models::ApiResponse;

pub async fn get_term(
    service: &AcademicTermService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let term = storage
        .get_term_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Academic term not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        term,
        "Academic term retrieved successfully",
    )))
}

pub async fn get_current_term(
    service: &AcademicTermService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let term = storage
        .get_current_term()
        .await?
        .ok_or_else(|| EduSystemError::not_found("No current academic term is set"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        term,
        "Current academic term retrieved successfully",
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
    async fn test_current_term_lookup() {
        let inner = test_support::storage().await;
        let spring = test_support::term(&inner, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let request = anonymous_request(&storage);
        let service = AcademicTermService::new_lazy();

        assert_eq!(status_of(get_current_term(&service, &request).await), 404);

        storage.activate_term(spring.id).await.unwrap();
        assert_eq!(status_of(get_current_term(&service, &request).await), 200);

        assert_eq!(
            status_of(get_term(&service, Uuid::new_v4(), &request).await),
            404
        );
    }
}
