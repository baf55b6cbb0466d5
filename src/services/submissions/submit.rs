use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::submissions::{entities::Submission, requests::SubmitAssignmentRequest};
use crate::policy::{AccessPolicy, Actor};
use crate::services::error_response;
use crate::utils::validate::validate_required;

pub async fn submit(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    assignment_id: i64,
    submit_data: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    match try_submit(service, request, actor, assignment_id, submit_data).await {
        Ok(submission) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(submission, "Submission saved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn try_submit(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    assignment_id: i64,
    submit_data: SubmitAssignmentRequest,
) -> Result<Submission> {
    validate_required(&submit_data.content, "Content is required")
        .map_err(LmsError::validation)?;

    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_submit(&actor, assignment_id)
        .await?
        .into_result()?;

    let submission = storage
        .upsert_submission(assignment_id, actor.id, &submit_data.content)
        .await?;
    info!(
        "Student {} submitted assignment {} (submission {})",
        actor.id, assignment_id, submission.id
    );
    Ok(submission)
}
