use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::submissions::responses::SubmissionListResponse;
use crate::policy::{AccessPolicy, Actor};
use crate::services::error_response;

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    match load_submissions(service, request, actor, assignment_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Submissions retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn load_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: Actor,
    assignment_id: i64,
) -> Result<SubmissionListResponse> {
    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_list_submissions(&actor, assignment_id)
        .await?
        .into_result()?;

    let submissions = storage
        .list_submissions_for_assignment(assignment_id)
        .await?;
    Ok(SubmissionListResponse { submissions })
}
