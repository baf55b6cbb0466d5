use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::submissions::{entities::Submission, requests::GradeSubmissionRequest};
use crate::policy::{AccessPolicy, Actor, rules::SUBMISSION_NOT_FOUND};
use crate::services::error_response;
use crate::utils::validate::validate_grade;

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    submission_id: i64,
    grade_data: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    match try_grade(service, request, actor, submission_id, grade_data).await {
        Ok(submission) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(submission, "Submission graded"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn try_grade(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    submission_id: i64,
    grade_data: GradeSubmissionRequest,
) -> Result<Submission> {
    validate_grade(grade_data.grade).map_err(LmsError::validation)?;

    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_grade_submission(&actor, submission_id)
        .await?
        .into_result()?;

    let submission = storage
        .grade_submission(submission_id, grade_data.grade, grade_data.feedback)
        .await?
        .ok_or_else(|| LmsError::not_found(SUBMISSION_NOT_FOUND))?;
    info!(
        "Submission {} graded {} by {}",
        submission_id, grade_data.grade, actor.id
    );
    Ok(submission)
}
