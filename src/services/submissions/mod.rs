pub mod detail;
pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::submissions::requests::{GradeSubmissionRequest, SubmitAssignmentRequest};
use crate::policy::Actor;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 学生提交（重复提交覆盖内容）
    pub async fn submit(
        &self,
        request: &HttpRequest,
        actor: Actor,
        assignment_id: i64,
        submit_data: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit(self, request, actor, assignment_id, submit_data).await
    }

    // 学生查看自己的提交
    pub async fn get_my_submission(
        &self,
        request: &HttpRequest,
        actor: Actor,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_my_submission(self, request, actor, assignment_id).await
    }

    // 教师查看作业的全部提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        actor: Actor,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, actor, assignment_id).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        actor: Actor,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, actor, submission_id).await
    }

    // 评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        actor: Actor,
        submission_id: i64,
        grade_data: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, actor, submission_id, grade_data).await
    }
}
