use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, enrollments::requests::CreateEnrollmentRequest,
    students::entities::StudentStatus, users::entities::UserRole,
};
use crate::services::access::own_student_id;
use crate::utils::validate::today;

pub async fn create_enrollment(
    service: &EnrollmentService,
    req: CreateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    // 学生只能为自己选课，教师不能代选
    match user.role {
        UserRole::Admin | UserRole::Staff => {}
        UserRole::Student => {
            if own_student_id(storage.as_ref(), &user).await? != req.student_id {
                return Err(EduSystemError::authorization("Students can only enroll themselves").into());
            }
        }
        UserRole::Teacher => {
            return Err(EduSystemError::authorization(
                "You do not have permission to perform this action",
            )
            .into());
        }
    }

    let student = storage
        .get_student_by_id(req.student_id, false)
        .await?
        .ok_or_else(|| EduSystemError::validation("student_id does not exist"))?;
    if student.status != StudentStatus::Active {
        return Err(EduSystemError::conflict("Student is not active").into());
    }

    let course = storage
        .get_course_by_id(req.course_id, false)
        .await?
        .ok_or_else(|| EduSystemError::validation("course_id does not exist"))?;
    if !course.is_open() {
        return Err(EduSystemError::conflict("Course is not open for enrollment").into());
    }

    let term = storage
        .get_term_by_id(req.term_id)
        .await?
        .ok_or_else(|| EduSystemError::validation("term_id does not exist"))?;
    if !term.enrollment_open_on(today()) {
        return Err(EduSystemError::conflict("Enrollment window is closed for this term").into());
    }

    let enrollment = storage
        .enroll_with_capacity(student.id, course.id, term.id, course.capacity.max(0) as u64)
        .await?;
    info!(
        "Student {} enrolled in course {} for term {}",
        student.student_number, course.code, term.code
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        enrollment,
        "Enrollment created successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::UpdateStudentRequest;
    use crate::services::test_helpers::{account, request_as, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use std::sync::Arc;

    fn service() -> EnrollmentService {
        EnrollmentService::new_lazy()
    }

    #[actix_web::test]
    async fn test_capacity_and_duplicates() {
        let inner = test_support::storage().await;
        let course = test_support::course(&inner, "CS101", 1).await;
        let first = test_support::student(&inner, "S001").await;
        let second = test_support::student(&inner, "S002").await;
        let term = test_support::term(
            &inner,
            "T1",
            test_support::date(2020, 1, 1),
            test_support::date(2020, 6, 30),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let admin = account(&storage, "admin01", UserRole::Admin).await;
        let request = request_as(&storage, &admin);

        let req = |student_id| CreateEnrollmentRequest {
            student_id,
            course_id: course.id,
            term_id: term.id,
        };

        assert_eq!(
            status_of(create_enrollment(&service(), req(first.id), &request).await),
            201
        );
        assert_eq!(
            status_of(create_enrollment(&service(), req(first.id), &request).await),
            409
        );
        // 容量为 1，第二名学生被拒绝
        assert_eq!(
            status_of(create_enrollment(&service(), req(second.id), &request).await),
            409
        );
    }

    #[actix_web::test]
    async fn test_completed_enrollment_blocks_reenrollment() {
        let inner = test_support::storage().await;
        let course = test_support::course(&inner, "CS104", 10).await;
        let student = test_support::student(&inner, "S030").await;
        let term = test_support::term(
            &inner,
            "T4",
            test_support::date(2020, 1, 1),
            test_support::date(2020, 6, 30),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let admin = account(&storage, "admin02", UserRole::Admin).await;
        let request = request_as(&storage, &admin);

        let req = || CreateEnrollmentRequest {
            student_id: student.id,
            course_id: course.id,
            term_id: term.id,
        };
        assert_eq!(
            status_of(create_enrollment(&service(), req(), &request).await),
            201
        );

        let enrollments = storage.list_student_enrollments(student.id).await.unwrap();
        storage
            .update_enrollment_status(
                enrollments[0].enrollment.id,
                crate::models::enrollments::entities::EnrollmentStatus::Completed,
            )
            .await
            .unwrap();

        assert_eq!(
            status_of(create_enrollment(&service(), req(), &request).await),
            409
        );
        assert_eq!(storage.list_student_enrollments(student.id).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_student_enrolls_only_self() {
        let inner = test_support::storage().await;
        let course = test_support::course(&inner, "CS102", 10).await;
        let mine = test_support::student(&inner, "S010").await;
        let other = test_support::student(&inner, "S011").await;
        let term = test_support::term(
            &inner,
            "T2",
            test_support::date(2020, 1, 1),
            test_support::date(2020, 6, 30),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let user = account(&storage, "student10", UserRole::Student).await;
        storage
            .update_student(
                mine.id,
                UpdateStudentRequest {
                    user_id: Some(user.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let request = request_as(&storage, &user);

        let for_other = CreateEnrollmentRequest {
            student_id: other.id,
            course_id: course.id,
            term_id: term.id,
        };
        assert_eq!(
            status_of(create_enrollment(&service(), for_other, &request).await),
            403
        );

        let for_self = CreateEnrollmentRequest {
            student_id: mine.id,
            course_id: course.id,
            term_id: term.id,
        };
        assert_eq!(
            status_of(create_enrollment(&service(), for_self, &request).await),
            201
        );
    }

    #[actix_web::test]
    async fn test_closed_window_and_unknown_course() {
        let inner = test_support::storage().await;
        let student = test_support::student(&inner, "S020").await;
        let course = test_support::course(&inner, "CS103", 10).await;
        let term = test_support::term(
            &inner,
            "T3",
            test_support::date(2020, 1, 1),
            test_support::date(2020, 6, 30),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        storage
            .update_term(
                term.id,
                crate::models::academic_terms::requests::UpdateAcademicTermRequest {
                    enrollment_start: Some(Some(test_support::date(2019, 12, 1))),
                    enrollment_end: Some(Some(test_support::date(2020, 1, 15))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let staff = account(&storage, "staff01", UserRole::Staff).await;
        let request = request_as(&storage, &staff);

        let closed = CreateEnrollmentRequest {
            student_id: student.id,
            course_id: course.id,
            term_id: term.id,
        };
        assert_eq!(
            status_of(create_enrollment(&service(), closed, &request).await),
            409
        );

        let unknown = CreateEnrollmentRequest {
            student_id: student.id,
            course_id: uuid::Uuid::new_v4(),
            term_id: term.id,
        };
        assert_eq!(
            status_of(create_enrollment(&service(), unknown, &request).await),
            400
        );
    }
}
