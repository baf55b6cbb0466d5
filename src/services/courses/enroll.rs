use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::courses::{
    entities::Enrollment, requests::EnrollStudentRequest, responses::EnrollmentListResponse,
};
use crate::policy::{AccessPolicy, Actor, rules::STUDENT_NOT_FOUND};
use crate::services::error_response;
use crate::utils::validate::validate_email;

pub async fn enroll_student(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
    enroll_data: EnrollStudentRequest,
) -> ActixResult<HttpResponse> {
    match try_enroll(service, request, actor, course_id, enroll_data).await {
        Ok(enrollment) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(enrollment, "Student enrolled"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn try_enroll(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
    enroll_data: EnrollStudentRequest,
) -> Result<Enrollment> {
    let email = enroll_data.student_email.trim();
    validate_email(email).map_err(LmsError::validation)?;

    let storage = service.get_storage(request)?;
    let target = storage.get_user_by_email(email).await?;

    AccessPolicy::new(storage.as_ref())
        .can_enroll_student(&actor, course_id, target.as_ref().map(|u| u.role))
        .await?
        .into_result()?;

    let student = target.ok_or_else(|| LmsError::not_found(STUDENT_NOT_FOUND))?;
    let enrollment = storage.enroll_student(student.id, course_id).await?;
    info!("Student {} enrolled in course {}", student.id, course_id);
    Ok(enrollment)
}

pub async fn list_enrollments(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    match load_enrollments(service, request, actor, course_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Enrollments retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn load_enrollments(
    service: &CourseService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
) -> Result<EnrollmentListResponse> {
    let storage = service.get_storage(request)?;

    AccessPolicy::new(storage.as_ref())
        .can_list_enrollments(&actor, course_id)
        .await?
        .into_result()?;

    let students = storage.list_enrolled_students(course_id).await?;
    Ok(EnrollmentListResponse { students })
}
