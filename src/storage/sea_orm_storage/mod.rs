//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academic_terms;
mod attendance;
mod audit_logs;
mod courses;
mod departments;
mod enrollments;
mod faculties;
mod grades;
mod schedules;
mod students;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{EduSystemError, Result, map_db_err};
use crate::models::{PaginationMeta, PaginationQuery};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Select,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::run_migrations(&db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EduSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| EduSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EduSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 内存 SQLite，单连接保证所有查询看到同一个库
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| EduSystemError::database_config(e.to_string()))?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| EduSystemError::database_connection(e.to_string()))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Self::run_migrations(&db).await?;
        Ok(Self { db })
    }

    pub(crate) async fn ping_impl(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| EduSystemError::database_connection(format!("数据库不可用: {e}")))
    }
}

/// 按分页参数执行查询，返回当前页数据和分页信息
pub(crate) async fn fetch_page<C, E>(
    db: &C,
    select: Select<E>,
    pagination: &PaginationQuery,
    context: &'static str,
) -> Result<(Vec<E::Model>, PaginationMeta)>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: Send + Sync,
{
    let (page, limit) = pagination.resolve();
    let paginator = select.paginate(db, limit);
    let total = paginator.num_items().await.map_err(map_db_err(context))?;
    // 偏移量已超出总数时不再查询
    let items = if (page - 1).saturating_mul(limit) >= total {
        Vec::new()
    } else {
        paginator
            .fetch_page(page - 1)
            .await
            .map_err(map_db_err(context))?
    };

    Ok((items, PaginationMeta::new(page, limit, total)))
}

pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

// Storage trait 实现
use crate::models::{
    PaginatedResponse,
    academic_terms::{
        entities::AcademicTerm,
        requests::{AcademicTermListQuery, CreateAcademicTermRequest, UpdateAcademicTermRequest},
    },
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus},
        requests::{AttendanceListQuery, UpdateAttendanceRequest},
    },
    audit_logs::{
        entities::{AuditLog, NewAuditLog},
        requests::AuditLogListQuery,
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    },
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
    },
    enrollments::{
        entities::{Enrollment, EnrollmentStatus, EnrollmentWithCourse, RosterEntry},
        requests::EnrollmentListQuery,
    },
    faculties::{
        entities::Faculty,
        requests::{CreateFacultyRequest, FacultyListQuery, UpdateFacultyRequest},
    },
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
    },
    schedules::{
        entities::Schedule,
        requests::{CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest},
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn ping(&self) -> Result<()> {
        self.ping_impl().await
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: Uuid, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn record_login_success(&self, id: Uuid) -> Result<()> {
        self.record_login_success_impl(id).await
    }

    async fn record_login_failure(
        &self,
        id: Uuid,
        max_attempts: i32,
        lockout_minutes: i64,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        self.record_login_failure_impl(id, max_attempts, lockout_minutes)
            .await
    }

    // 学院模块
    async fn create_faculty(&self, req: CreateFacultyRequest) -> Result<Faculty> {
        self.create_faculty_impl(req).await
    }

    async fn get_faculty_by_id(&self, id: Uuid) -> Result<Option<Faculty>> {
        self.get_faculty_by_id_impl(id).await
    }

    async fn list_faculties_with_pagination(
        &self,
        query: FacultyListQuery,
    ) -> Result<PaginatedResponse<Faculty>> {
        self.list_faculties_with_pagination_impl(query).await
    }

    async fn update_faculty(
        &self,
        id: Uuid,
        update: UpdateFacultyRequest,
    ) -> Result<Option<Faculty>> {
        self.update_faculty_impl(id, update).await
    }

    async fn delete_faculty(&self, id: Uuid) -> Result<bool> {
        self.delete_faculty_impl(id).await
    }

    async fn count_departments_in_faculty(&self, faculty_id: Uuid) -> Result<u64> {
        self.count_departments_in_faculty_impl(faculty_id).await
    }

    // 院系模块
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(req).await
    }

    async fn get_department_by_id(&self, id: Uuid) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<PaginatedResponse<Department>> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn update_department(
        &self,
        id: Uuid,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, update).await
    }

    async fn delete_department(&self, id: Uuid) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    async fn count_department_references(&self, department_id: Uuid) -> Result<u64> {
        self.count_department_references_impl(department_id).await
    }

    // 学期模块
    async fn create_term(&self, req: CreateAcademicTermRequest) -> Result<AcademicTerm> {
        self.create_term_impl(req).await
    }

    async fn get_term_by_id(&self, id: Uuid) -> Result<Option<AcademicTerm>> {
        self.get_term_by_id_impl(id).await
    }

    async fn list_terms_with_pagination(
        &self,
        query: AcademicTermListQuery,
    ) -> Result<PaginatedResponse<AcademicTerm>> {
        self.list_terms_with_pagination_impl(query).await
    }

    async fn update_term(
        &self,
        id: Uuid,
        update: UpdateAcademicTermRequest,
    ) -> Result<Option<AcademicTerm>> {
        self.update_term_impl(id, update).await
    }

    async fn delete_term(&self, id: Uuid) -> Result<bool> {
        self.delete_term_impl(id).await
    }

    async fn find_overlapping_term(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<AcademicTerm>> {
        self.find_overlapping_term_impl(start, end, exclude_id)
            .await
    }

    async fn activate_term(&self, id: Uuid) -> Result<Option<AcademicTerm>> {
        self.activate_term_impl(id).await
    }

    async fn get_current_term(&self) -> Result<Option<AcademicTerm>> {
        self.get_current_term_impl().await
    }

    async fn count_term_references(&self, term_id: Uuid) -> Result<u64> {
        self.count_term_references_impl(term_id).await
    }

    // 教师模块
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher_by_id(&self, id: Uuid, include_deleted: bool) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id, include_deleted).await
    }

    async fn get_teacher_by_user_id(&self, user_id: Uuid) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher(
        &self,
        id: Uuid,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn soft_delete_teacher(&self, id: Uuid) -> Result<bool> {
        self.soft_delete_teacher_impl(id).await
    }

    async fn restore_teacher(&self, id: Uuid) -> Result<bool> {
        self.restore_teacher_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: Uuid, include_deleted: bool) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id, include_deleted).await
    }

    async fn get_student_by_user_id(&self, user_id: Uuid) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: Uuid,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn soft_delete_student(&self, id: Uuid) -> Result<bool> {
        self.soft_delete_student_impl(id).await
    }

    async fn restore_student(&self, id: Uuid) -> Result<bool> {
        self.restore_student_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(req).await
    }

    async fn get_course_by_id(&self, id: Uuid, include_deleted: bool) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id, include_deleted).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(&self, id: Uuid, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn soft_delete_course(&self, id: Uuid) -> Result<bool> {
        self.soft_delete_course_impl(id).await
    }

    async fn restore_course(&self, id: Uuid) -> Result<bool> {
        self.restore_course_impl(id).await
    }

    async fn list_course_roster(
        &self,
        course_id: Uuid,
        term_id: Option<Uuid>,
    ) -> Result<Vec<RosterEntry>> {
        self.list_course_roster_impl(course_id, term_id).await
    }

    // 选课模块
    async fn create_enrollment(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        term_id: Uuid,
    ) -> Result<Enrollment> {
        self.create_enrollment_impl(student_id, course_id, term_id)
            .await
    }

    async fn get_enrollment_by_id(&self, id: Uuid) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_id_impl(id).await
    }

    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>> {
        self.list_enrollments_with_pagination_impl(query).await
    }

    async fn enroll_with_capacity(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        term_id: Uuid,
        capacity: u64,
    ) -> Result<Enrollment> {
        self.enroll_with_capacity_impl(student_id, course_id, term_id, capacity)
            .await
    }

    async fn has_active_enrollment_in_course(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool> {
        self.has_active_enrollment_in_course_impl(student_id, course_id)
            .await
    }

    async fn update_enrollment_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_status_impl(id, status).await
    }

    async fn delete_enrollment(&self, id: Uuid) -> Result<bool> {
        self.delete_enrollment_impl(id).await
    }

    async fn list_student_enrollments(&self, student_id: Uuid) -> Result<Vec<EnrollmentWithCourse>> {
        self.list_student_enrollments_impl(student_id).await
    }

    // 成绩模块
    async fn create_grade(
        &self,
        req: CreateGradeRequest,
        graded_by: Option<Uuid>,
    ) -> Result<Grade> {
        self.create_grade_impl(req, graded_by).await
    }

    async fn get_grade_by_id(&self, id: Uuid) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<PaginatedResponse<Grade>> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn update_grade(
        &self,
        id: Uuid,
        update: UpdateGradeRequest,
        graded_by: Option<Uuid>,
    ) -> Result<Option<Grade>> {
        self.update_grade_impl(id, update, graded_by).await
    }

    async fn delete_grade(&self, id: Uuid) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    async fn list_grades_for_student(&self, student_id: Uuid) -> Result<Vec<Grade>> {
        self.list_grades_for_student_impl(student_id).await
    }

    // 考勤模块
    async fn create_attendance(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        date: NaiveDate,
        status: AttendanceStatus,
        remarks: Option<String>,
        recorded_by: Option<Uuid>,
    ) -> Result<AttendanceRecord> {
        self.create_attendance_impl(student_id, course_id, date, status, remarks, recorded_by)
            .await
    }

    async fn get_attendance_by_id(&self, id: Uuid) -> Result<Option<AttendanceRecord>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<AttendanceRecord>> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn update_attendance(
        &self,
        id: Uuid,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        self.update_attendance_impl(id, update).await
    }

    async fn delete_attendance(&self, id: Uuid) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    async fn list_attendance_for_student(
        &self,
        student_id: Uuid,
        course_id: Option<Uuid>,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_for_student_impl(student_id, course_id)
            .await
    }

    // 课表模块
    async fn create_schedule(&self, req: CreateScheduleRequest) -> Result<Schedule> {
        self.create_schedule_impl(req).await
    }

    async fn get_schedule_by_id(&self, id: Uuid) -> Result<Option<Schedule>> {
        self.get_schedule_by_id_impl(id).await
    }

    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<PaginatedResponse<Schedule>> {
        self.list_schedules_with_pagination_impl(query).await
    }

    async fn update_schedule(
        &self,
        id: Uuid,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>> {
        self.update_schedule_impl(id, update).await
    }

    async fn delete_schedule(&self, id: Uuid) -> Result<bool> {
        self.delete_schedule_impl(id).await
    }

    async fn list_schedules_for_day(
        &self,
        term_id: Uuid,
        day_of_week: i32,
    ) -> Result<Vec<Schedule>> {
        self.list_schedules_for_day_impl(term_id, day_of_week).await
    }

    // 审计日志模块
    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog> {
        self.create_audit_log_impl(log).await
    }

    async fn get_audit_log_by_id(&self, id: Uuid) -> Result<Option<AuditLog>> {
        self.get_audit_log_by_id_impl(id).await
    }

    async fn list_audit_logs_with_pagination(
        &self,
        query: AuditLogListQuery,
    ) -> Result<PaginatedResponse<AuditLog>> {
        self.list_audit_logs_with_pagination_impl(query).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 存储层测试的公共数据构造

    use super::SeaOrmStorage;
    use crate::models::{
        academic_terms::{entities::AcademicTerm, requests::CreateAcademicTermRequest},
        courses::{entities::Course, requests::CreateCourseRequest},
        faculties::requests::CreateFacultyRequest,
        departments::{entities::Department, requests::CreateDepartmentRequest},
        students::{entities::Student, requests::CreateStudentRequest},
        teachers::{entities::Teacher, requests::CreateTeacherRequest},
    };
    use chrono::NaiveDate;

    pub async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::new_in_memory()
            .await
            .expect("in-memory storage")
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub async fn department(storage: &SeaOrmStorage, code: &str) -> Department {
        let faculty = storage
            .create_faculty_impl(CreateFacultyRequest {
                code: format!("F{code}"),
                name: format!("Faculty {code}"),
                description: None,
                dean_name: None,
            })
            .await
            .unwrap();
        storage
            .create_department_impl(CreateDepartmentRequest {
                faculty_id: faculty.id,
                code: code.to_string(),
                name: format!("Department {code}"),
                description: None,
                head_teacher_id: None,
            })
            .await
            .unwrap()
    }

    pub async fn teacher(storage: &SeaOrmStorage, number: &str) -> Teacher {
        storage
            .create_teacher_impl(CreateTeacherRequest {
                user_id: None,
                employee_number: number.to_string(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: format!("{number}@school.edu"),
                phone: None,
                department_id: None,
                title: None,
                hire_date: None,
                status: None,
            })
            .await
            .unwrap()
    }

    pub async fn student(storage: &SeaOrmStorage, number: &str) -> Student {
        storage
            .create_student_impl(CreateStudentRequest {
                user_id: None,
                student_number: number.to_string(),
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                email: format!("{number}@student.edu"),
                date_of_birth: Some(date(2004, 5, 1)),
                gender: None,
                phone: None,
                address: None,
                department_id: None,
                enrollment_date: None,
                status: None,
            })
            .await
            .unwrap()
    }

    pub async fn course(storage: &SeaOrmStorage, code: &str, capacity: i32) -> Course {
        storage
            .create_course_impl(CreateCourseRequest {
                code: code.to_string(),
                name: format!("Course {code}"),
                description: None,
                credits: 3,
                department_id: None,
                teacher_id: None,
                capacity,
                status: None,
            })
            .await
            .unwrap()
    }

    pub async fn term(storage: &SeaOrmStorage, code: &str, start: NaiveDate, end: NaiveDate) -> AcademicTerm {
        storage
            .create_term_impl(CreateAcademicTermRequest {
                code: code.to_string(),
                name: format!("Term {code}"),
                start_date: start,
                end_date: end,
                enrollment_start: None,
                enrollment_end: None,
                is_current: false,
            })
            .await
            .unwrap()
    }
}
