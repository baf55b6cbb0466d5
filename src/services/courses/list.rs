use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::responses::{CourseListResponse, MyCoursesResponse};
use crate::policy::Actor;
use crate::services::error_response;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    let taught = match storage.list_courses_taught(actor.id).await {
        Ok(courses) => courses,
        Err(e) => return Ok(error_response(&e)),
    };
    let enrolled = match storage.list_courses_enrolled(actor.id).await {
        Ok(courses) => courses,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseListResponse { taught, enrolled },
        "Courses retrieved",
    )))
}

pub async fn list_my_courses(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    let courses = if actor.is_teacher() {
        storage.list_courses_taught(actor.id).await
    } else {
        storage.list_courses_enrolled(actor.id).await
    };

    match courses {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MyCoursesResponse { courses },
            "Courses retrieved",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
