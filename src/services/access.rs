//! 数据级权限检查
//!
//! 路由上的 RequireRole 只能按角色拦截；学生只能访问自己的档案、
//! 教师只能管理自己任课的课程，这类规则依赖具体数据，在服务层检查。

use uuid::Uuid;

use crate::errors::{EduSystemError, Result};
use crate::models::courses::entities::Course;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

pub fn require_staff(user: &User) -> Result<()> {
    if user.role.is_staff() {
        Ok(())
    } else {
        Err(EduSystemError::authorization(
            "You do not have permission to perform this action",
        ))
    }
}

/// 学生账号关联的学生档案 ID
pub async fn own_student_id(storage: &dyn Storage, user: &User) -> Result<Uuid> {
    storage
        .get_student_by_user_id(user.id)
        .await?
        .map(|student| student.id)
        .ok_or_else(|| {
            EduSystemError::authorization("No student profile is linked to this account")
        })
}

/// 学生只能访问自己的档案，其他角色不受限
pub async fn ensure_student_access(
    storage: &dyn Storage,
    user: &User,
    student_id: Uuid,
) -> Result<()> {
    if user.role != UserRole::Student {
        return Ok(());
    }
    if own_student_id(storage, user).await? == student_id {
        Ok(())
    } else {
        Err(EduSystemError::authorization(
            "Students can only access their own records",
        ))
    }
}

/// 管理员与教务人员可管理所有课程，教师只能管理自己任课的课程
pub async fn ensure_course_manager(
    storage: &dyn Storage,
    user: &User,
    course: &Course,
) -> Result<()> {
    match user.role {
        UserRole::Admin | UserRole::Staff => Ok(()),
        UserRole::Teacher => {
            let teacher = storage.get_teacher_by_user_id(user.id).await?;
            let owns = matches!(
                (teacher, course.teacher_id),
                (Some(teacher), Some(teacher_id)) if teacher.id == teacher_id
            );
            if owns {
                Ok(())
            } else {
                Err(EduSystemError::authorization(
                    "Teachers can only manage their own courses",
                ))
            }
        }
        UserRole::Student => Err(EduSystemError::authorization(
            "You do not have permission to perform this action",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::UpdateStudentRequest;
    use crate::models::teachers::requests::UpdateTeacherRequest;
    use crate::models::users::entities::UserStatus;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::sea_orm_storage::test_support;

    async fn account(storage: &dyn Storage, name: &str, role: UserRole) -> User {
        storage
            .create_user(CreateUserRequest {
                username: name.to_string(),
                email: format!("{name}@school.edu"),
                password: "hash".into(),
                role,
                display_name: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_student_sees_only_own_record() {
        let storage = test_support::storage().await;
        let mine = test_support::student(&storage, "S001").await;
        let other = test_support::student(&storage, "S002").await;
        let user = account(&storage, "student1", UserRole::Student).await;
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

        assert!(ensure_student_access(&storage, &user, mine.id).await.is_ok());
        let err = ensure_student_access(&storage, &user, other.id)
            .await
            .unwrap_err();
        assert!(matches!(err, EduSystemError::Authorization(_)));

        let staff = account(&storage, "staff01", UserRole::Staff).await;
        assert_eq!(staff.status, UserStatus::Active);
        assert!(ensure_student_access(&storage, &staff, other.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_teacher_manages_only_own_course() {
        let storage = test_support::storage().await;
        let teacher = test_support::teacher(&storage, "T001").await;
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

        let mut course = test_support::course(&storage, "CS101", 30).await;
        assert!(ensure_course_manager(&storage, &user, &course).await.is_err());

        course.teacher_id = Some(teacher.id);
        assert!(ensure_course_manager(&storage, &user, &course).await.is_ok());

        let student = account(&storage, "student1", UserRole::Student).await;
        assert!(ensure_course_manager(&storage, &student, &course).await.is_err());
    }
}
