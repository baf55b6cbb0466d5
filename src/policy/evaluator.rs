use tracing::info;

use super::{AccessFacts, Actor, CourseAccess, Decision, SubmissionOwnerChain, rules};
use crate::errors::Result;
use crate::models::users::entities::UserRole;

/// 访问策略评估器
///
/// 每次调用都重新读取事实：先解析资源所属课程，再只取规则需要的事实，最后应用规则。
/// 存储故障以 `Err` 返回，拒绝以 `Ok(Decision::Deny { .. })` 返回。
pub struct AccessPolicy<'a, F: AccessFacts + ?Sized> {
    facts: &'a F,
}

impl<'a, F: AccessFacts + ?Sized> AccessPolicy<'a, F> {
    pub fn new(facts: &'a F) -> Self {
        Self { facts }
    }

    async fn course(&self, actor: &Actor, course_id: i64) -> Result<Option<CourseAccess>> {
        self.facts
            .course_owner_and_enrollment(course_id, actor.id)
            .await
    }

    // 作业 → 课程
    async fn assignment_course(
        &self,
        actor: &Actor,
        assignment_id: i64,
    ) -> Result<Option<CourseAccess>> {
        match self.facts.assignment_course_id(assignment_id).await? {
            Some(course_id) => self.course(actor, course_id).await,
            None => Ok(None),
        }
    }

    async fn submission_chain(&self, submission_id: i64) -> Result<Option<SubmissionOwnerChain>> {
        self.facts.submission_owner_chain(submission_id).await
    }

    /// 创建课程，不访问存储
    pub fn can_create_course(&self, actor: &Actor) -> Decision {
        log_denial("create_course", actor, 0, rules::create_course(actor))
    }

    pub async fn can_read_course(&self, actor: &Actor, course_id: i64) -> Result<Decision> {
        let course = self.course(actor, course_id).await?;
        Ok(log_denial(
            "read_course",
            actor,
            course_id,
            rules::read_course(actor, course.as_ref()),
        ))
    }

    pub async fn can_read_modules(&self, actor: &Actor, course_id: i64) -> Result<Decision> {
        let course = self.course(actor, course_id).await?;
        Ok(log_denial(
            "read_modules",
            actor,
            course_id,
            rules::read_modules(actor, course.as_ref()),
        ))
    }

    /// 添加学生，`target_role` 为按邮箱查到的用户角色
    pub async fn can_enroll_student(
        &self,
        actor: &Actor,
        course_id: i64,
        target_role: Option<UserRole>,
    ) -> Result<Decision> {
        let course = self.course(actor, course_id).await?;
        Ok(log_denial(
            "enroll_student",
            actor,
            course_id,
            rules::enroll_student(actor, course.as_ref(), target_role),
        ))
    }

    pub async fn can_list_enrollments(&self, actor: &Actor, course_id: i64) -> Result<Decision> {
        let course = self.course(actor, course_id).await?;
        Ok(log_denial(
            "list_enrollments",
            actor,
            course_id,
            rules::list_enrollments(actor, course.as_ref()),
        ))
    }

    /// 创建或重排模块
    pub async fn can_manage_modules(&self, actor: &Actor, course_id: i64) -> Result<Decision> {
        let course = self.course(actor, course_id).await?;
        Ok(log_denial(
            "manage_modules",
            actor,
            course_id,
            rules::manage_modules(actor, course.as_ref()),
        ))
    }

    pub async fn can_create_assignment(&self, actor: &Actor, course_id: i64) -> Result<Decision> {
        let course = self.course(actor, course_id).await?;
        Ok(log_denial(
            "create_assignment",
            actor,
            course_id,
            rules::create_assignment(actor, course.as_ref()),
        ))
    }

    pub async fn can_read_assignment(&self, actor: &Actor, assignment_id: i64) -> Result<Decision> {
        let course = self.assignment_course(actor, assignment_id).await?;
        Ok(log_denial(
            "read_assignment",
            actor,
            assignment_id,
            rules::read_assignment(actor, course.as_ref()),
        ))
    }

    pub async fn can_submit(&self, actor: &Actor, assignment_id: i64) -> Result<Decision> {
        let course = self.assignment_course(actor, assignment_id).await?;
        Ok(log_denial(
            "submit",
            actor,
            assignment_id,
            rules::submit(actor, course.as_ref()),
        ))
    }

    pub async fn can_list_submissions(
        &self,
        actor: &Actor,
        assignment_id: i64,
    ) -> Result<Decision> {
        let course = self.assignment_course(actor, assignment_id).await?;
        Ok(log_denial(
            "list_submissions",
            actor,
            assignment_id,
            rules::list_submissions(actor, course.as_ref()),
        ))
    }

    pub async fn can_read_submission(
        &self,
        actor: &Actor,
        submission_id: i64,
    ) -> Result<Decision> {
        let chain = self.submission_chain(submission_id).await?;
        Ok(log_denial(
            "read_submission",
            actor,
            submission_id,
            rules::read_own_submission(actor, chain.as_ref()),
        ))
    }

    pub async fn can_grade_submission(
        &self,
        actor: &Actor,
        submission_id: i64,
    ) -> Result<Decision> {
        let chain = self.submission_chain(submission_id).await?;
        Ok(log_denial(
            "grade_submission",
            actor,
            submission_id,
            rules::grade_submission(actor, chain.as_ref()),
        ))
    }
}

fn log_denial(action: &str, actor: &Actor, resource_id: i64, decision: Decision) -> Decision {
    if let Decision::Deny { reason, message } = &decision {
        info!(
            action,
            actor_id = actor.id,
            role = %actor.role,
            resource_id,
            %reason,
            "Access denied: {}",
            message
        );
    }
    decision
}
