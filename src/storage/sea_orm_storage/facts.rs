//! 策略事实查询

use super::SeaOrmStorage;
use crate::entity::assignments::Entity as Assignments;
use crate::entity::courses::Entity as Courses;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::submissions::Entity as Submissions;
use crate::errors::{LmsError, Result};
use crate::policy::{AccessFacts, CourseAccess, SubmissionOwnerChain};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    async fn course_teacher_id(&self, course_id: i64) -> Result<Option<i64>> {
        let course = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query course: {e}")))?;

        Ok(course.map(|c| c.teacher_id))
    }

    async fn is_enrolled(&self, user_id: i64, course_id: i64) -> Result<bool> {
        let count = Enrollments::find()
            .filter(EnrollmentColumn::UserId.eq(user_id))
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query enrollment: {e}")))?;

        Ok(count > 0)
    }
}

#[async_trait::async_trait]
impl AccessFacts for SeaOrmStorage {
    async fn course_owner_and_enrollment(
        &self,
        course_id: i64,
        actor_id: i64,
    ) -> Result<Option<CourseAccess>> {
        let Some(teacher_id) = self.course_teacher_id(course_id).await? else {
            return Ok(None);
        };

        // 教师本人无需查询选课
        let enrolled = teacher_id != actor_id && self.is_enrolled(actor_id, course_id).await?;

        Ok(Some(CourseAccess {
            teacher_id,
            enrolled,
        }))
    }

    async fn assignment_course_id(&self, assignment_id: i64) -> Result<Option<i64>> {
        let assignment = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query assignment: {e}")))?;

        Ok(assignment.map(|a| a.course_id))
    }

    async fn submission_owner_chain(
        &self,
        submission_id: i64,
    ) -> Result<Option<SubmissionOwnerChain>> {
        let Some(submission) = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query submission: {e}")))?
        else {
            return Ok(None);
        };

        let Some(course_id) = self.assignment_course_id(submission.assignment_id).await? else {
            return Ok(None);
        };
        let Some(course_teacher_id) = self.course_teacher_id(course_id).await? else {
            return Ok(None);
        };

        Ok(Some(SubmissionOwnerChain {
            student_id: submission.student_id,
            course_teacher_id,
        }))
    }
}
