//! 选课状态流转：enrolled -> dropped / completed

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{EnrollmentService, load_enrollment};
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, enrollments::entities::EnrollmentStatus, users::entities::UserRole,
};
use crate::services::access::{ensure_course_manager, ensure_student_access};

pub async fn drop_enrollment(
    service: &EnrollmentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    let enrollment = load_enrollment(storage.as_ref(), id).await?;
    match user.role {
        UserRole::Admin | UserRole::Staff => {}
        UserRole::Student => {
            ensure_student_access(storage.as_ref(), &user, enrollment.student_id).await?
        }
        UserRole::Teacher => {
            return Err(EduSystemError::authorization(
                "You do not have permission to perform this action",
            )
            .into());
        }
    }

    if enrollment.status != EnrollmentStatus::Enrolled {
        return Err(EduSystemError::conflict(format!(
            "Only enrolled enrollments can be dropped, current status is {}",
            enrollment.status
        ))
        .into());
    }

    let updated = storage
        .update_enrollment_status(id, EnrollmentStatus::Dropped)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Enrollment not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Enrollment dropped successfully",
    )))
}

pub async fn complete_enrollment(
    service: &EnrollmentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    let enrollment = load_enrollment(storage.as_ref(), id).await?;
    let course = storage
        .get_course_by_id(enrollment.course_id, true)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Course not found"))?;
    ensure_course_manager(storage.as_ref(), &user, &course).await?;

    if enrollment.status != EnrollmentStatus::Enrolled {
        return Err(EduSystemError::conflict(format!(
            "Only enrolled enrollments can be completed, current status is {}",
            enrollment.status
        ))
        .into());
    }

    let updated = storage
        .update_enrollment_status(id, EnrollmentStatus::Completed)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Enrollment not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Enrollment completed successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_helpers::{account, request_as, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_drop_then_complete_is_conflict() {
        let inner = test_support::storage().await;
        let student = test_support::student(&inner, "S001").await;
        let course = test_support::course(&inner, "CS101", 10).await;
        let term = test_support::term(
            &inner,
            "T1",
            test_support::date(2020, 1, 1),
            test_support::date(2020, 6, 30),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let enrollment = storage
            .create_enrollment(student.id, course.id, term.id)
            .await
            .unwrap();
        let staff = account(&storage, "staff01", UserRole::Staff).await;
        let request = request_as(&storage, &staff);
        let service = EnrollmentService::new_lazy();

        assert_eq!(
            status_of(drop_enrollment(&service, enrollment.id, &request).await),
            200
        );
        let dropped = storage
            .get_enrollment_by_id(enrollment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(dropped.status, EnrollmentStatus::Dropped);
        assert!(dropped.dropped_at.is_some());

        assert_eq!(
            status_of(drop_enrollment(&service, enrollment.id, &request).await),
            409
        );
        assert_eq!(
            status_of(complete_enrollment(&service, enrollment.id, &request).await),
            409
        );
    }

    #[actix_web::test]
    async fn test_teacher_cannot_drop() {
        let inner = test_support::storage().await;
        let student = test_support::student(&inner, "S002").await;
        let course = test_support::course(&inner, "CS102", 10).await;
        let term = test_support::term(
            &inner,
            "T2",
            test_support::date(2020, 1, 1),
            test_support::date(2020, 6, 30),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let enrollment = storage
            .create_enrollment(student.id, course.id, term.id)
            .await
            .unwrap();
        let teacher = account(&storage, "teacher1", UserRole::Teacher).await;
        let request = request_as(&storage, &teacher);

        assert_eq!(
            status_of(
                drop_enrollment(&EnrollmentService::new_lazy(), enrollment.id, &request).await
            ),
            403
        );
    }
}
