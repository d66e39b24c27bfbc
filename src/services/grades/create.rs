use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, gradable_enrollment};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, grades::requests::CreateGradeRequest};
use crate::utils::validate::Validate;

pub async fn create_grade(
    service: &GradeService,
    req: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    gradable_enrollment(storage.as_ref(), &user, req.enrollment_id).await?;

    let grade = storage.create_grade(req, Some(user.id)).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        grade,
        "Grade created successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enrollments::entities::EnrollmentStatus;
    use crate::models::teachers::requests::UpdateTeacherRequest;
    use crate::models::courses::requests::UpdateCourseRequest;
    use crate::models::users::entities::UserRole;
    use crate::services::test_helpers::{account, request_as, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use std::sync::Arc;
    use uuid::Uuid;

    fn grade(enrollment_id: Uuid, assessment: &str, score: f64) -> CreateGradeRequest {
        CreateGradeRequest {
            enrollment_id,
            assessment: assessment.into(),
            score,
            max_score: None,
            weight: None,
            remarks: None,
        }
    }

    #[actix_web::test]
    async fn test_teacher_grades_own_course_only() {
        let inner = test_support::storage().await;
        let student = test_support::student(&inner, "S001").await;
        let course = test_support::course(&inner, "CS101", 10).await;
        let teacher = test_support::teacher(&inner, "T001").await;
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

        let user = account(&storage, "teacher1", UserRole::Teacher).await;
        storage
            .update_teacher(
                teacher.id,
                UpdateTeacherRequest {
                    user_id: Some(user.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let request = request_as(&storage, &user);
        let service = GradeService::new_lazy();

        assert_eq!(
            status_of(create_grade(&service, grade(enrollment.id, "midterm", 85.0), &request).await),
            403
        );

        storage
            .update_course(
                course.id,
                UpdateCourseRequest {
                    teacher_id: Some(teacher.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            status_of(create_grade(&service, grade(enrollment.id, "midterm", 85.0), &request).await),
            201
        );
        assert_eq!(
            status_of(create_grade(&service, grade(enrollment.id, "midterm", 90.0), &request).await),
            409
        );
        assert_eq!(
            status_of(create_grade(&service, grade(enrollment.id, "final", 120.0), &request).await),
            400
        );
    }

    #[actix_web::test]
    async fn test_dropped_enrollment_refused() {
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
        storage
            .update_enrollment_status(enrollment.id, EnrollmentStatus::Dropped)
            .await
            .unwrap();

        let staff = account(&storage, "staff01", UserRole::Staff).await;
        let request = request_as(&storage, &staff);
        assert_eq!(
            status_of(
                create_grade(
                    &GradeService::new_lazy(),
                    grade(enrollment.id, "final", 70.0),
                    &request
                )
                .await
            ),
            409
        );
    }
}
