use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::policy::{AccessPolicy, Actor};
use crate::services::error_response;
use crate::utils::validate::{validate_points, validate_required};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    match try_create_assignment(service, request, actor, course_id, assignment_data).await {
        Ok(assignment) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(assignment, "Assignment created"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn try_create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
    mut assignment_data: CreateAssignmentRequest,
) -> Result<Assignment> {
    validate_required(&assignment_data.title, "Title is required")
        .map_err(LmsError::validation)?;
    validate_points(assignment_data.points).map_err(LmsError::validation)?;
    assignment_data.title = assignment_data.title.trim().to_string();

    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_create_assignment(&actor, course_id)
        .await?
        .into_result()?;

    let assignment = storage.create_assignment(course_id, assignment_data).await?;
    info!("Assignment {} created in course {}", assignment.id, course_id);
    Ok(assignment)
}
