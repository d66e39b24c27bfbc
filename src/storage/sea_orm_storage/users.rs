use super::{SeaOrmStorage, fetch_page, now_ts};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, map_db_err};
use crate::models::{
    PaginatedResponse,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = now_ts();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            last_login: Set(None),
            failed_login_attempts: Set(0),
            locked_until: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_db_err("创建用户失败"))?;

        Ok(result.into_user())
    }

    pub async fn get_user_by_id_impl(&self, id: Uuid) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(map_db_err("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>> {
        let mut select = Users::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::DisplayName.contains(&escaped)),
            );
        }

        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let (users, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询用户列表失败").await?;

        Ok(PaginatedResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination,
        })
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: Uuid,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(display_name) = update.display_name {
            model.display_name = Set(Some(display_name));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(map_db_err("更新用户失败"))?;

        Ok(Some(updated.into_user()))
    }

    pub async fn delete_user_impl(&self, id: Uuid) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err("删除用户失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(map_db_err("统计用户数量失败"))
    }

    /// 登录成功：清零失败次数并记录登录时间
    pub async fn record_login_success_impl(&self, id: Uuid) -> Result<()> {
        let now = now_ts();

        Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(now))
            .col_expr(Column::FailedLoginAttempts, Expr::value(0))
            .col_expr(Column::LockedUntil, Expr::value(Option::<i64>::None))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err("更新登录状态失败"))?;

        Ok(())
    }

    /// 登录失败：失败次数加一，达到上限时锁定并重新计数
    ///
    /// 计数在数据库内自增，并发的失败请求不会互相覆盖。
    pub async fn record_login_failure_impl(
        &self,
        id: Uuid,
        max_attempts: i32,
        lockout_minutes: i64,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        let now = chrono::Utc::now();

        let txn = self
            .db
            .begin()
            .await
            .map_err(map_db_err("开启事务失败"))?;

        let incremented = Users::update_many()
            .col_expr(
                Column::FailedLoginAttempts,
                Expr::cust("failed_login_attempts + 1"),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now.timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err("更新登录失败次数失败"))?;
        if incremented.rows_affected == 0 {
            return Ok(None);
        }

        let until = now + chrono::Duration::minutes(lockout_minutes);
        let locked = Users::update_many()
            .col_expr(Column::FailedLoginAttempts, Expr::value(0))
            .col_expr(Column::LockedUntil, Expr::value(Some(until.timestamp())))
            .filter(Column::Id.eq(id))
            .filter(Column::FailedLoginAttempts.gte(max_attempts.max(1)))
            .exec(&txn)
            .await
            .map_err(map_db_err("锁定账号失败"))?;

        txn.commit().await.map_err(map_db_err("提交事务失败"))?;

        Ok((locked.rows_affected > 0).then_some(until))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::storage;
    use super::*;
    use crate::errors::EduSystemError;
    use crate::models::{PaginationQuery, users::entities::UserRole};

    fn new_user(username: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@school.edu"),
            password: "hashed".to_string(),
            role,
            display_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let storage = storage().await;
        let user = storage
            .create_user_impl(new_user("alice", UserRole::Staff))
            .await
            .unwrap();

        let by_name = storage
            .get_user_by_username_or_email_impl("alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.id, user.id);

        let by_email = storage
            .get_user_by_username_or_email_impl("alice@school.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.role, UserRole::Staff);
        assert_eq!(by_email.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let storage = storage().await;
        storage
            .create_user_impl(new_user("alice", UserRole::Staff))
            .await
            .unwrap();

        let mut dup = new_user("alice", UserRole::Teacher);
        dup.email = "other@school.edu".into();
        let err = storage.create_user_impl(dup).await.unwrap_err();
        assert!(matches!(err, EduSystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_pagination() {
        let storage = storage().await;
        for name in ["alice", "bobby", "carol"] {
            storage
                .create_user_impl(new_user(name, UserRole::Teacher))
                .await
                .unwrap();
        }
        storage
            .create_user_impl(new_user("admin", UserRole::Admin))
            .await
            .unwrap();

        let page = storage
            .list_users_with_pagination_impl(UserListQuery {
                pagination: PaginationQuery {
                    page: Some(1),
                    limit: Some(2),
                },
                role: Some(UserRole::Teacher),
                status: None,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(page.pagination.has_next);

        let found = storage
            .list_users_with_pagination_impl(UserListQuery {
                search: Some("car".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].username, "carol");
    }

    #[tokio::test]
    async fn test_lockout_after_max_attempts() {
        let storage = storage().await;
        let user = storage
            .create_user_impl(new_user("alice", UserRole::Student))
            .await
            .unwrap();

        for _ in 0..2 {
            let locked = storage
                .record_login_failure_impl(user.id, 3, 15)
                .await
                .unwrap();
            assert!(locked.is_none());
        }
        let locked = storage
            .record_login_failure_impl(user.id, 3, 15)
            .await
            .unwrap();
        assert!(locked.is_some());

        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert!(reloaded.is_locked(chrono::Utc::now()));

        storage.record_login_success_impl(user.id).await.unwrap();
        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert!(!reloaded.is_locked(chrono::Utc::now()));
        assert_eq!(reloaded.failed_login_attempts, 0);
        assert!(reloaded.last_login.is_some());
    }

    #[tokio::test]
    async fn test_concurrent_failures_all_counted() {
        let storage = storage().await;
        let user = storage
            .create_user_impl(new_user("bobby", UserRole::Student))
            .await
            .unwrap();

        let attempts = (0..4).map(|_| storage.record_login_failure_impl(user.id, 5, 15));
        let results = futures_util::future::join_all(attempts).await;
        assert!(results.iter().all(|r| matches!(r, Ok(None))));

        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.failed_login_attempts, 4);

        let locked = storage
            .record_login_failure_impl(user.id, 5, 15)
            .await
            .unwrap();
        assert!(locked.is_some());
        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.failed_login_attempts, 0);

        assert!(
            storage
                .record_login_failure_impl(Uuid::new_v4(), 5, 15)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_page_far_past_end_is_empty() {
        let storage = storage().await;
        storage
            .create_user_impl(new_user("alice", UserRole::Staff))
            .await
            .unwrap();

        let page = storage
            .list_users_with_pagination_impl(UserListQuery {
                pagination: PaginationQuery {
                    page: Some(i64::MAX),
                    limit: Some(20),
                },
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 1);
        assert!(!page.pagination.has_next);
    }
}
