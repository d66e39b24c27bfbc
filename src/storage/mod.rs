use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 健康检查
    async fn ping(&self) -> Result<()>;

    /// 用户管理方法
    // 创建用户（password 字段为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>>;
    // 更新用户信息（password 字段为已哈希的密码）
    async fn update_user(&self, id: Uuid, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;
    // 登录成功：清零失败计数、解除锁定、更新最后登录时间
    async fn record_login_success(&self, id: Uuid) -> Result<()>;
    // 登录失败：累加失败计数，达到上限时锁定，返回锁定截止时间
    async fn record_login_failure(
        &self,
        id: Uuid,
        max_attempts: i32,
        lockout_minutes: i64,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>>;

    /// 学院管理方法
    async fn create_faculty(&self, req: CreateFacultyRequest) -> Result<Faculty>;
    async fn get_faculty_by_id(&self, id: Uuid) -> Result<Option<Faculty>>;
    async fn list_faculties_with_pagination(
        &self,
        query: FacultyListQuery,
    ) -> Result<PaginatedResponse<Faculty>>;
    async fn update_faculty(&self, id: Uuid, update: UpdateFacultyRequest)
    -> Result<Option<Faculty>>;
    async fn delete_faculty(&self, id: Uuid) -> Result<bool>;
    async fn count_departments_in_faculty(&self, faculty_id: Uuid) -> Result<u64>;

    /// 院系管理方法
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, id: Uuid) -> Result<Option<Department>>;
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<PaginatedResponse<Department>>;
    async fn update_department(
        &self,
        id: Uuid,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, id: Uuid) -> Result<bool>;
    // 统计引用该院系的未删除学生、教师、课程数量
    async fn count_department_references(&self, department_id: Uuid) -> Result<u64>;

    /// 学期管理方法
    async fn create_term(&self, req: CreateAcademicTermRequest) -> Result<AcademicTerm>;
    async fn get_term_by_id(&self, id: Uuid) -> Result<Option<AcademicTerm>>;
    async fn list_terms_with_pagination(
        &self,
        query: AcademicTermListQuery,
    ) -> Result<PaginatedResponse<AcademicTerm>>;
    async fn update_term(
        &self,
        id: Uuid,
        update: UpdateAcademicTermRequest,
    ) -> Result<Option<AcademicTerm>>;
    async fn delete_term(&self, id: Uuid) -> Result<bool>;
    // 查找与闭区间 [start, end] 重叠的其他学期
    async fn find_overlapping_term(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<AcademicTerm>>;
    // 设为当前学期并清除其他学期的标记
    async fn activate_term(&self, id: Uuid) -> Result<Option<AcademicTerm>>;
    async fn get_current_term(&self) -> Result<Option<AcademicTerm>>;
    // 统计引用该学期的选课和课表数量
    async fn count_term_references(&self, term_id: Uuid) -> Result<u64>;

    /// 教师管理方法
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: Uuid, include_deleted: bool) -> Result<Option<Teacher>>;
    async fn get_teacher_by_user_id(&self, user_id: Uuid) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>>;
    async fn update_teacher(&self, id: Uuid, update: UpdateTeacherRequest)
    -> Result<Option<Teacher>>;
    async fn soft_delete_teacher(&self, id: Uuid) -> Result<bool>;
    async fn restore_teacher(&self, id: Uuid) -> Result<bool>;

    /// 学生管理方法
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: Uuid, include_deleted: bool) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: Uuid) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>>;
    async fn update_student(&self, id: Uuid, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    async fn soft_delete_student(&self, id: Uuid) -> Result<bool>;
    async fn restore_student(&self, id: Uuid) -> Result<bool>;

    /// 课程管理方法
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: Uuid, include_deleted: bool) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>>;
    async fn update_course(&self, id: Uuid, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn soft_delete_course(&self, id: Uuid) -> Result<bool>;
    async fn restore_course(&self, id: Uuid) -> Result<bool>;
    // 课程名单（未退课的选课记录及学生信息）
    async fn list_course_roster(
        &self,
        course_id: Uuid,
        term_id: Option<Uuid>,
    ) -> Result<Vec<RosterEntry>>;

    /// 选课管理方法
    async fn create_enrollment(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        term_id: Uuid,
    ) -> Result<Enrollment>;
    async fn get_enrollment_by_id(&self, id: Uuid) -> Result<Option<Enrollment>>;
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>>;
    // 重复选课或课程已满时返回 Conflict，检查与写入在同一事务内完成
    async fn enroll_with_capacity(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        term_id: Uuid,
        capacity: u64,
    ) -> Result<Enrollment>;
    // 学生在课程中是否有未退课的选课记录
    async fn has_active_enrollment_in_course(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool>;
    async fn update_enrollment_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>>;
    async fn delete_enrollment(&self, id: Uuid) -> Result<bool>;
    async fn list_student_enrollments(&self, student_id: Uuid) -> Result<Vec<EnrollmentWithCourse>>;

    /// 成绩管理方法
    async fn create_grade(
        &self,
        req: CreateGradeRequest,
        graded_by: Option<Uuid>,
    ) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: Uuid) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<PaginatedResponse<Grade>>;
    async fn update_grade(
        &self,
        id: Uuid,
        update: UpdateGradeRequest,
        graded_by: Option<Uuid>,
    ) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: Uuid) -> Result<bool>;
    async fn list_grades_for_student(&self, student_id: Uuid) -> Result<Vec<Grade>>;

    /// 考勤管理方法
    async fn create_attendance(
        &self,
        student_id: Uuid,
        course_id: Uuid,
        date: NaiveDate,
        status: AttendanceStatus,
        remarks: Option<String>,
        recorded_by: Option<Uuid>,
    ) -> Result<AttendanceRecord>;
    async fn get_attendance_by_id(&self, id: Uuid) -> Result<Option<AttendanceRecord>>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<AttendanceRecord>>;
    async fn update_attendance(
        &self,
        id: Uuid,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>>;
    async fn delete_attendance(&self, id: Uuid) -> Result<bool>;
    async fn list_attendance_for_student(
        &self,
        student_id: Uuid,
        course_id: Option<Uuid>,
    ) -> Result<Vec<AttendanceRecord>>;

    /// 课表管理方法
    async fn create_schedule(&self, req: CreateScheduleRequest) -> Result<Schedule>;
    async fn get_schedule_by_id(&self, id: Uuid) -> Result<Option<Schedule>>;
    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<PaginatedResponse<Schedule>>;
    async fn update_schedule(
        &self,
        id: Uuid,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>>;
    async fn delete_schedule(&self, id: Uuid) -> Result<bool>;
    // 同一学期同一天的全部时段，用于冲突检查
    async fn list_schedules_for_day(&self, term_id: Uuid, day_of_week: i32)
    -> Result<Vec<Schedule>>;

    /// 审计日志方法
    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog>;
    async fn get_audit_log_by_id(&self, id: Uuid) -> Result<Option<AuditLog>>;
    async fn list_audit_logs_with_pagination(
        &self,
        query: AuditLogListQuery,
    ) -> Result<PaginatedResponse<AuditLog>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
