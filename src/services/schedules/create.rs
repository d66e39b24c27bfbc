use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::conflict::{Slot, ensure_no_conflict};
use super::{ScheduleService, check_references};
use crate::models::{ApiResponse, schedules::requests::CreateScheduleRequest};
use crate::utils::validate::Validate;

pub async fn create_schedule(
    service: &ScheduleService,
    req: CreateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;

    let course = check_references(storage.as_ref(), req.course_id, req.term_id).await?;
    let room = req.room.trim().to_string();
    let slot = Slot {
        course: &course,
        term_id: req.term_id,
        day_of_week: req.day_of_week,
        start_time: req.start_time,
        end_time: req.end_time,
        room: &room,
    };
    ensure_no_conflict(storage.as_ref(), &slot, None).await?;

    let schedule = storage.create_schedule(req).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        schedule,
        "Schedule created successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_helpers::{account, request_as, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use chrono::NaiveTime;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_room_conflict_rejected() {
        let inner = test_support::storage().await;
        let first = test_support::course(&inner, "CS101", 10).await;
        let second = test_support::course(&inner, "CS102", 10).await;
        let term = test_support::term(
            &inner,
            "T1",
            test_support::date(2020, 1, 1),
            test_support::date(2020, 6, 30),
        )
        .await;
        let storage: Arc<dyn Storage> = Arc::new(inner);
        let staff = account(&storage, "staff01", UserRole::Staff).await;
        let request = request_as(&storage, &staff);
        let service = ScheduleService::new_lazy();

        let slot = |course_id, start: u32, end: u32| CreateScheduleRequest {
            course_id,
            term_id: term.id,
            day_of_week: 0,
            start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
            room: "A101".into(),
        };

        assert_eq!(status_of(create_schedule(&service, slot(first.id, 9, 11), &request).await), 201);
        assert_eq!(status_of(create_schedule(&service, slot(second.id, 10, 12), &request).await), 409);
        assert_eq!(status_of(create_schedule(&service, slot(second.id, 11, 12), &request).await), 201);
    }
}
