use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{AcademicTermService, ensure_no_overlap};
use crate::errors::EduSystemError;
use crate::models::academic_terms::requests::{UpdateAcademicTermRequest, validate_term_dates};
use crate::models::ApiResponse;
use crate::utils::validate::Validate;

pub async fn update_term(
    service: &AcademicTermService,
    id: Uuid,
    req: UpdateAcademicTermRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;

    let existing = storage
        .get_term_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Academic term not found"))?;

    // 合并后的日期整体校验
    let start = req.start_date.unwrap_or(existing.start_date);
    let end = req.end_date.unwrap_or(existing.end_date);
    let enrollment_start = req.enrollment_start.unwrap_or(existing.enrollment_start);
    let enrollment_end = req.enrollment_end.unwrap_or(existing.enrollment_end);
    validate_term_dates(start, end, enrollment_start, enrollment_end)?;

    if start != existing.start_date || end != existing.end_date {
        ensure_no_overlap(storage.as_ref(), start, end, Some(id)).await?;
    }

    let term = storage
        .update_term(id, req)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Academic term not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        term,
        "Academic term updated successfully",
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
    async fn test_update_overlap_and_window_clearing() {
        let inner = test_support::storage().await;
        let spring = test_support::term(&inner, "2025S", date(2025, 2, 1), date(2025, 6, 30)).await;
        let fall = test_support::term(&inner, "2025F", date(2025, 9, 1), date(2026, 1, 15)).await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let request = anonymous_request(&storage);
        let service = AcademicTermService::new_lazy();

        let stretch = UpdateAcademicTermRequest {
            end_date: Some(date(2025, 9, 15)),
            ..Default::default()
        };
        assert_eq!(
            status_of(update_term(&service, spring.id, stretch, &request).await),
            409
        );

        // 只移动自身日期不与自己冲突
        let shift = UpdateAcademicTermRequest {
            start_date: Some(date(2025, 1, 15)),
            ..Default::default()
        };
        assert_eq!(
            status_of(update_term(&service, spring.id, shift, &request).await),
            200
        );

        let window = UpdateAcademicTermRequest {
            enrollment_start: Some(Some(date(2025, 8, 1))),
            enrollment_end: Some(Some(date(2025, 9, 10))),
            ..Default::default()
        };
        assert_eq!(
            status_of(update_term(&service, fall.id, window, &request).await),
            200
        );

        let clear = UpdateAcademicTermRequest {
            enrollment_start: Some(None),
            enrollment_end: Some(None),
            ..Default::default()
        };
        assert_eq!(
            status_of(update_term(&service, fall.id, clear, &request).await),
            200
        );
        let fall = storage.get_term_by_id(fall.id).await.unwrap().unwrap();
        assert!(fall.enrollment_start.is_none());
        assert!(fall.enrollment_end.is_none());
    }
}
