use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, ensure_enrolled, managed_course};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, attendance::requests::CreateAttendanceRequest};
use crate::utils::validate::Validate;

pub async fn create_attendance(
    service: &AttendanceService,
    req: CreateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    let course = managed_course(storage.as_ref(), &user, req.course_id).await?;
    ensure_enrolled(storage.as_ref(), req.student_id, course.id).await?;

    let record = storage
        .create_attendance(
            req.student_id,
            course.id,
            req.date,
            req.status,
            req.remarks,
            Some(user.id),
        )
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        record,
        "Attendance recorded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::users::entities::UserRole;
    use crate::services::test_helpers::{account, request_as, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use crate::utils::validate::today;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_single_record_rules() {
        let inner = test_support::storage().await;
        let enrolled = test_support::student(&inner, "S001").await;
        let outsider = test_support::student(&inner, "S002").await;
        let course = test_support::course(&inner, "CS101", 10).await;
        let term = test_support::term(
            &inner,
            "T1",
            test_support::date(2020, 1, 1),
            test_support::date(2020, 6, 30),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        storage
            .create_enrollment(enrolled.id, course.id, term.id)
            .await
            .unwrap();
        let staff = account(&storage, "staff01", UserRole::Staff).await;
        let request = request_as(&storage, &staff);
        let service = AttendanceService::new_lazy();

        let record = |student_id, date| CreateAttendanceRequest {
            student_id,
            course_id: course.id,
            date,
            status: AttendanceStatus::Present,
            remarks: None,
        };
        let tomorrow = today() + chrono::Duration::days(1);
        let day = test_support::date(2020, 3, 2);

        assert_eq!(
            status_of(create_attendance(&service, record(enrolled.id, tomorrow), &request).await),
            400
        );
        assert_eq!(
            status_of(create_attendance(&service, record(outsider.id, day), &request).await),
            400
        );
        assert_eq!(
            status_of(create_attendance(&service, record(enrolled.id, day), &request).await),
            201
        );
        assert_eq!(
            status_of(create_attendance(&service, record(enrolled.id, day), &request).await),
            409
        );
    }
}
