use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::conflict::{Slot, ensure_no_conflict};
use super::{ScheduleService, check_references};
use crate::errors::EduSystemError;
use crate::models::{
    ApiResponse,
    schedules::requests::{UpdateScheduleRequest, validate_slot},
};
use crate::utils::validate::Validate;

pub async fn update_schedule(
    service: &ScheduleService,
    id: Uuid,
    req: UpdateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let storage = service.get_storage(request)?;

    let existing = storage
        .get_schedule_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Schedule not found"))?;

    // 合并后的时段
    let course_id = req.course_id.unwrap_or(existing.course_id);
    let term_id = req.term_id.unwrap_or(existing.term_id);
    let day_of_week = req.day_of_week.unwrap_or(existing.day_of_week);
    let start_time = req.start_time.unwrap_or(existing.start_time);
    let end_time = req.end_time.unwrap_or(existing.end_time);
    let room = req
        .room
        .as_deref()
        .map(str::trim)
        .unwrap_or(&existing.room)
        .to_string();
    validate_slot(day_of_week, start_time, end_time)?;

    let course = check_references(storage.as_ref(), course_id, term_id).await?;
    let slot = Slot {
        course: &course,
        term_id,
        day_of_week,
        start_time,
        end_time,
        room: &room,
    };
    ensure_no_conflict(storage.as_ref(), &slot, Some(id)).await?;

    let schedule = storage
        .update_schedule(id, req)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Schedule not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        schedule,
        "Schedule updated successfully",
    )))
}
