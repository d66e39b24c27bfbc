use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::UserService;
use crate::errors::EduSystemError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::invalidate_user_cache;

pub async fn delete_user(
    service: &UserService,
    user_id: Uuid,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 禁止删除当前登录的账号
    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Err(EduSystemError::validation("Cannot delete the current user").into());
    }

    let storage = service.get_storage(request)?;
    if !storage.delete_user(user_id).await? {
        return Err(EduSystemError::not_found("User not found").into());
    }

    invalidate_user_cache(request, user_id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_helpers::{account, request_as, status_of};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_admin_cannot_delete_self() {
        let storage: Arc<dyn Storage> = Arc::new(test_support::storage().await);
        let admin = account(&storage, "admin01", UserRole::Admin).await;
        let other = account(&storage, "staff01", UserRole::Staff).await;
        let request = request_as(&storage, &admin);
        let service = UserService::new_lazy();

        assert_eq!(status_of(delete_user(&service, admin.id, &request).await), 400);
        assert!(storage.get_user_by_id(admin.id).await.unwrap().is_some());

        assert_eq!(status_of(delete_user(&service, other.id, &request).await), 200);
        assert_eq!(status_of(delete_user(&service, other.id, &request).await), 404);
    }
}
