use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::submissions::{entities::Submission, responses::MySubmissionResponse};
use crate::policy::{AccessPolicy, Actor, rules::SUBMISSION_NOT_FOUND};
use crate::services::error_response;

pub async fn get_my_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    match load_my_submission(service, request, actor, assignment_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Submission retrieved",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 尚未提交时返回 submission: null
async fn load_my_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    assignment_id: i64,
) -> Result<MySubmissionResponse> {
    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_read_assignment(&actor, assignment_id)
        .await?
        .into_result()?;

    let submission = storage
        .get_student_submission(assignment_id, actor.id)
        .await?;
    Ok(MySubmissionResponse { submission })
}

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    match load_submission(service, request, actor, submission_id).await {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submission,
            "Submission retrieved",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn load_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    submission_id: i64,
) -> Result<Submission> {
    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_read_submission(&actor, submission_id)
        .await?
        .into_result()?;

    storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LmsError::not_found(SUBMISSION_NOT_FOUND))
}
