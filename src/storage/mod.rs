use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{
        entities::{Course, Enrollment},
        requests::CreateCourseRequest,
        responses::EnrolledStudent,
    },
    modules::entities::Module,
    submissions::{entities::Submission, responses::SubmissionListItem},
    users::{entities::User, requests::CreateUserRequest},
};
use crate::policy::AccessFacts;

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层
///
/// 同时提供策略评估所需的只读事实（见 [`AccessFacts`]）。
#[async_trait::async_trait]
pub trait Storage: AccessFacts {
    /// 用户管理方法
    // 创建用户，邮箱重复时返回 Conflict
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程，teacher_id 为创建者
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出教师任教的课程
    async fn list_courses_taught(&self, teacher_id: i64) -> Result<Vec<Course>>;
    // 列出学生已选的课程
    async fn list_courses_enrolled(&self, user_id: i64) -> Result<Vec<Course>>;

    /// 选课管理方法
    // 学生选课，重复选课返回已有记录
    async fn enroll_student(&self, user_id: i64, course_id: i64) -> Result<Enrollment>;
    // 列出课程的学生
    async fn list_enrolled_students(&self, course_id: i64) -> Result<Vec<EnrolledStudent>>;

    /// 模块管理方法
    // 追加模块，order 为当前最大值 + 1
    async fn create_module(&self, course_id: i64, title: &str) -> Result<Module>;
    // 按 order 升序列出模块
    async fn list_modules(&self, course_id: i64) -> Result<Vec<Module>>;
    // 在单个事务中校验并重排，id 集合不符时返回 Conflict 且不做任何修改
    async fn apply_module_order_atomically(
        &self,
        course_id: i64,
        module_ids_in_order: &[i64],
    ) -> Result<Vec<Module>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        course_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业信息
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 按创建时间倒序列出课程作业
    async fn list_assignments(&self, course_id: i64) -> Result<Vec<Assignment>>;

    /// 提交管理方法
    // 提交或覆盖提交，保留已有评分
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: &str,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取学生在某作业下的提交
    async fn get_student_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出作业的全部提交（附学生信息）
    async fn list_submissions_for_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionListItem>>;
    // 评分，feedback 为 None 时保留原反馈
    async fn grade_submission(
        &self,
        submission_id: i64,
        grade: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
