use crate::errors::Result;

/// 课程归属与选课事实
///
/// `enrolled` 仅在主体不是课程教师时才会被查询，教师本人恒为 `false`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseAccess {
    pub teacher_id: i64,
    pub enrolled: bool,
}

/// 提交 → 作业 → 课程 的归属链
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOwnerChain {
    pub student_id: i64,
    pub course_teacher_id: i64,
}

/// 策略评估所需的只读事实查询
///
/// 资源不存在时返回 `Ok(None)`，存储故障返回 `Err`。
#[async_trait::async_trait]
pub trait AccessFacts: Send + Sync {
    // 课程教师及主体是否已选课
    async fn course_owner_and_enrollment(
        &self,
        course_id: i64,
        actor_id: i64,
    ) -> Result<Option<CourseAccess>>;
    // 作业所属课程
    async fn assignment_course_id(&self, assignment_id: i64) -> Result<Option<i64>>;
    // 提交的学生及其课程教师
    async fn submission_owner_chain(
        &self,
        submission_id: i64,
    ) -> Result<Option<SubmissionOwnerChain>>;
}
