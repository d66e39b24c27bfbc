use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AcademicTermService, ensure_no_overlap};
use crate::models::{ApiResponse, academic_terms::requests::CreateAcademicTermRequest};
use crate::utils::validate::Validate;

pub async fn create_term(
    service: &AcademicTermService,
    req: CreateAcademicTermRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;
    ensure_no_overlap(storage.as_ref(), req.start_date, req.end_date, None).await?;

    let term = storage.create_term(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        term,
        "Academic term created successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_helpers::{anonymous_request, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{self, date};
    use std::sync::Arc;

    fn new_term(code: &str, start: chrono::NaiveDate, end: chrono::NaiveDate) -> CreateAcademicTermRequest {
        CreateAcademicTermRequest {
            code: code.to_string(),
            name: format!("Term {code}"),
            start_date: start,
            end_date: end,
            enrollment_start: None,
            enrollment_end: None,
            is_current: false,
        }
    }

    #[actix_web::test]
    async fn test_overlapping_term_rejected() {
        let storage: Arc<dyn Storage> = Arc::new(test_support::storage().await);
        let request = anonymous_request(&storage);
        let service = AcademicTermService::new_lazy();

        let first = new_term("2025S", date(2025, 2, 1), date(2025, 6, 30));
        assert_eq!(status_of(create_term(&service, first, &request).await), 201);

        // 结束日与已有学期开始日相同也算重叠
        let touching = new_term("2024F", date(2024, 9, 1), date(2025, 2, 1));
        assert_eq!(status_of(create_term(&service, touching, &request).await), 409);

        let after = new_term("2025F", date(2025, 9, 1), date(2026, 1, 15));
        assert_eq!(status_of(create_term(&service, after, &request).await), 201);

        let reversed = new_term("2026S", date(2026, 6, 30), date(2026, 2, 1));
        assert_eq!(status_of(create_term(&service, reversed, &request).await), 400);
    }
}
