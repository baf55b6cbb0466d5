use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{entities::Assignment, responses::AssignmentListResponse};
use crate::policy::{AccessPolicy, Actor, rules::ASSIGNMENT_NOT_FOUND};
use crate::services::error_response;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    match load_assignments(service, request, actor, course_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Assignments retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn load_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
) -> Result<AssignmentListResponse> {
    let storage = service.get_storage(request)?;
    // 作业属于课程的子资源，沿用课程读取规则
    AccessPolicy::new(storage.as_ref())
        .can_read_course(&actor, course_id)
        .await?
        .into_result()?;

    let assignments = storage.list_assignments(course_id).await?;
    Ok(AssignmentListResponse { assignments })
}

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    actor: Actor,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    match load_assignment(service, request, actor, assignment_id).await {
        Ok(assignment) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(assignment, "Assignment retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn load_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    actor: Actor,
    assignment_id: i64,
) -> Result<Assignment> {
    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_read_assignment(&actor, assignment_id)
        .await?
        .into_result()?;

    storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| LmsError::not_found(ASSIGNMENT_NOT_FOUND))
}
