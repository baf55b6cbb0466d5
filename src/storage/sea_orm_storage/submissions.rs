//! 提交存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{LmsError, Result};
use crate::models::submissions::{
    entities::Submission,
    responses::{SubmissionListItem, SubmissionStudent},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 提交作业
    ///
    /// 以 (assignment_id, student_id) 为键的单条 upsert：首次提交插入，之后只更新
    /// content 与 submitted_at，grade、feedback、graded_at 保持不变。
    /// 并发的首次提交由唯一索引合并为同一行。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: &str,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(content.to_string()),
            submitted_at: Set(now),
            created_at: Set(now),
            grade: Set(None),
            feedback: Set(None),
            graded_at: Set(None),
            ..Default::default()
        };

        Submissions::insert(model)
            .on_conflict(
                OnConflict::columns([Column::AssignmentId, Column::StudentId])
                    .update_columns([Column::Content, Column::SubmittedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to save submission: {e}")))?;

        self.get_student_submission_impl(assignment_id, student_id)
            .await?
            .ok_or_else(|| LmsError::database_operation("Submission vanished after upsert"))
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, submission_id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query submission: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 学生在某作业下的提交
    pub async fn get_student_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query submission: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 作业的全部提交，最近提交的在前
    pub async fn list_submissions_for_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionListItem>> {
        let submissions = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to list submissions: {e}")))?;

        if submissions.is_empty() {
            return Ok(Vec::new());
        }

        // 批量查询提交者
        let student_ids: Vec<i64> = submissions.iter().map(|s| s.student_id).collect();
        let students: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query students: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.email))
            .collect();

        Ok(submissions
            .into_iter()
            .map(|m| {
                let email = students.get(&m.student_id).cloned().unwrap_or_default();
                let s = m.into_submission();
                SubmissionListItem {
                    id: s.id,
                    content: s.content,
                    submitted_at: s.submitted_at,
                    created_at: s.created_at,
                    grade: s.grade,
                    feedback: s.feedback,
                    graded_at: s.graded_at,
                    student: SubmissionStudent {
                        id: s.student_id,
                        email,
                    },
                }
            })
            .collect())
    }

    /// 评分
    ///
    /// feedback 为 `None` 时保留原有反馈。
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        grade: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let Some(model) = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to query submission: {e}")))?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.grade = Set(Some(grade));
        if let Some(feedback) = feedback {
            active.feedback = Set(Some(feedback));
        }
        active.graded_at = Set(Some(chrono::Utc::now().timestamp()));

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Failed to grade submission: {e}")))?;

        Ok(Some(updated.into_submission()))
    }
}
