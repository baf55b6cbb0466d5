use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use crate::policy::{AccessPolicy, Actor};
use crate::services::error_response;
use crate::utils::validate::validate_required;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    match try_create_course(service, request, actor, course_data).await {
        Ok(course) => Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn try_create_course(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
    mut course_data: CreateCourseRequest,
) -> Result<Course> {
    let storage = service.get_storage(request)?;

    // 角色检查先于任何写入
    AccessPolicy::new(storage.as_ref())
        .can_create_course(&actor)
        .into_result()?;

    validate_required(&course_data.title, "Title is required").map_err(LmsError::validation)?;
    course_data.title = course_data.title.trim().to_string();

    let course = storage.create_course(actor.id, course_data).await?;
    info!("Teacher {} created course {}", actor.id, course.id);
    Ok(course)
}
