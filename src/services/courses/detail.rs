use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::courses::responses::CourseDetailResponse;
use crate::policy::{AccessPolicy, Actor, rules::COURSE_NOT_FOUND};
use crate::services::error_response;

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    match load_course_detail(service, request, actor, course_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Course retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn load_course_detail(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
) -> Result<CourseDetailResponse> {
    let storage = service.get_storage(request)?;

    AccessPolicy::new(storage.as_ref())
        .can_read_course(&actor, course_id)
        .await?
        .into_result()?;

    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LmsError::not_found(COURSE_NOT_FOUND))?;
    let modules = storage.list_modules(course_id).await?;
    let assignments = storage.list_assignments(course_id).await?;

    Ok(CourseDetailResponse {
        course,
        modules,
        assignments,
    })
}
