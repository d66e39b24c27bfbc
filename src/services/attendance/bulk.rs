use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AttendanceService, ensure_enrolled, managed_course};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    attendance::requests::{BulkAttendanceRequest, BulkAttendanceResult, BulkAttendanceRowResult},
};
use crate::utils::validate::Validate;

/// 逐条登记，单条失败不影响其他记录
pub async fn bulk_create_attendance(
    service: &AttendanceService,
    req: BulkAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    let course = managed_course(storage.as_ref(), &user, req.course_id).await?;

    let mut results = Vec::with_capacity(req.records.len());
    for entry in req.records {
        let checked = match entry.validate() {
            Ok(()) => ensure_enrolled(storage.as_ref(), entry.student_id, course.id).await,
            Err(e) => Err(e),
        };
        let outcome = match checked {
            Ok(()) => {
                storage
                    .create_attendance(
                        entry.student_id,
                        course.id,
                        req.date,
                        entry.status,
                        entry.remarks,
                        Some(user.id),
                    )
                    .await
            }
            Err(e) => Err(e),
        };

        results.push(match outcome {
            Ok(record) => BulkAttendanceRowResult {
                student_id: entry.student_id,
                success: true,
                attendance_id: Some(record.id),
                error: None,
            },
            Err(e) => BulkAttendanceRowResult {
                student_id: entry.student_id,
                success: false,
                attendance_id: None,
                error: Some(e.message().to_string()),
            },
        });
    }

    let created = results.iter().filter(|r| r.success).count();
    let failed = results.len() - created;
    info!(
        "Bulk attendance for course {} on {}: {} created, {} failed",
        course.code, req.date, created, failed
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BulkAttendanceResult {
            created,
            failed,
            results,
        },
        "Bulk attendance processed",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::{entities::AttendanceStatus, requests::BulkAttendanceEntry};
    use crate::models::users::entities::UserRole;
    use crate::services::test_helpers::{account, request_as};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_rows_reported_individually() {
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

        let entry = |student_id| BulkAttendanceEntry {
            student_id,
            status: AttendanceStatus::Present,
            remarks: None,
        };
        let req = BulkAttendanceRequest {
            course_id: course.id,
            date: test_support::date(2020, 3, 2),
            records: vec![
                entry(enrolled.id),
                entry(outsider.id),
                entry(enrolled.id),
                BulkAttendanceEntry {
                    remarks: Some("x".repeat(501)),
                    ..entry(enrolled.id)
                },
            ],
        };

        let resp = bulk_create_attendance(&AttendanceService::new_lazy(), req, &request)
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["created"], 1);
        assert_eq!(json["data"]["failed"], 3);
        assert_eq!(json["data"]["results"][0]["success"], true);
        assert_eq!(json["data"]["results"][1]["success"], false);
        // 同一天重复登记
        assert_eq!(json["data"]["results"][2]["success"], false);
        // 备注超长
        assert_eq!(json["data"]["results"][3]["success"], false);
        assert!(
            json["data"]["results"][3]["error"]
                .as_str()
                .unwrap()
                .contains("remarks")
        );
    }
}
