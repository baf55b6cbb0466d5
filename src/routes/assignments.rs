use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::SubmitAssignmentRequest;
use crate::models::users::entities::UserRole;
use crate::policy::Actor;
use crate::services::{AssignmentService, SubmissionService};
use crate::utils::SafeAssignmentId;

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn get_assignment(
    req: HttpRequest,
    actor: Actor,
    assignment_id: SafeAssignmentId,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, actor, assignment_id.0)
        .await
}

pub async fn submit(
    req: HttpRequest,
    actor: Actor,
    assignment_id: SafeAssignmentId,
    submit_data: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(&req, actor, assignment_id.0, submit_data.into_inner())
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    actor: Actor,
    assignment_id: SafeAssignmentId,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, actor, assignment_id.0)
        .await
}

pub async fn get_my_submission(
    req: HttpRequest,
    actor: Actor,
    assignment_id: SafeAssignmentId,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_my_submission(&req, actor, assignment_id.0)
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/{assignment_id}").route(web::get().to(get_assignment)))
            .service(
                web::resource("/{assignment_id}/submissions")
                    // 提交 - 仅学生
                    .route(
                        web::post()
                            .to(submit)
                            .wrap(middlewares::RequireRole::new(UserRole::Student)),
                    )
                    // 提交列表 - 仅课程所有者
                    .route(
                        web::get()
                            .to(list_submissions)
                            .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                    ),
            )
            .service(
                web::resource("/{assignment_id}/my-submission").route(
                    web::get()
                        .to(get_my_submission)
                        .wrap(middlewares::RequireRole::new(UserRole::Student)),
                ),
            ),
    );
}
