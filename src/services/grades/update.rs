use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::{GradeService, gradable_enrollment};
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    grades::requests::{UpdateGradeRequest, validate_score},
};
use crate::utils::validate::Validate;

pub async fn update_grade(
    service: &GradeService,
    id: Uuid,
    req: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    req.validate()?;
    let user = RequireJWT::current_user(request)?;
    let storage = service.get_storage(request)?;

    let existing = storage
        .get_grade_by_id(id)
        .await?
        .ok_or_else(|| EduSystemError::not_found("Grade not found"))?;
    gradable_enrollment(storage.as_ref(), &user, existing.enrollment_id).await?;

    // 与原记录合并后再检查分数规则
    validate_score(
        req.score.unwrap_or(existing.score),
        req.max_score.unwrap_or(existing.max_score),
        req.weight.unwrap_or(existing.weight),
    )?;

    let grade = storage
        .update_grade(id, req, Some(user.id))
        .await?
        .ok_or_else(|| EduSystemError::not_found("Grade not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        grade,
        "Grade updated successfully",
    )))
}
