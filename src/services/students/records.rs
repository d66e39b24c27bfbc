//! 学生的选课、成绩单与考勤

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{StudentService, load_accessible_student};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, attendance::entities::StudentAttendanceOverview,
    students::responses::Transcript,
};

pub async fn list_enrollments(
    service: &StudentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = load_accessible_student(storage.as_ref(), &user, id).await?;

    let enrollments = storage.list_student_enrollments(student.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        enrollments,
        "Student enrollments retrieved successfully",
    )))
}

pub async fn get_transcript(
    service: &StudentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = load_accessible_student(storage.as_ref(), &user, id).await?;

    let enrollments = storage
        .list_student_enrollments(student.id)
        .await?
        .into_iter()
        .map(|e| (e.enrollment, e.course))
        .collect();
    let grades = storage.list_grades_for_student(student.id).await?;

    let transcript = Transcript::build(student, enrollments, &grades);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        transcript,
        "Transcript retrieved successfully",
    )))
}

pub async fn get_attendance(
    service: &StudentService,
    id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;
    let student = load_accessible_student(storage.as_ref(), &user, id).await?;

    let records = storage.list_attendance_for_student(student.id, None).await?;
    let overview = StudentAttendanceOverview::from_records(student.id, &records);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        overview,
        "Attendance overview retrieved successfully",
    )))
}
