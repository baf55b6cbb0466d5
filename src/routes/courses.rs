use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::courses::requests::{CreateCourseRequest, EnrollStudentRequest};
use crate::models::modules::requests::{CreateModuleRequest, ReorderModulesRequest};
use crate::models::users::entities::UserRole;
use crate::policy::Actor;
use crate::services::{AssignmentService, CourseService, ModuleService};
use crate::utils::SafeCourseId;

// 懒加载的全局服务实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static MODULE_SERVICE: Lazy<ModuleService> = Lazy::new(ModuleService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn create_course(
    req: HttpRequest,
    actor: Actor,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, actor, course_data.into_inner())
        .await
}

pub async fn list_courses(req: HttpRequest, actor: Actor) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, actor).await
}

pub async fn list_my_courses(req: HttpRequest, actor: Actor) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_my_courses(&req, actor).await
}

pub async fn get_course(
    req: HttpRequest,
    actor: Actor,
    course_id: SafeCourseId,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, actor, course_id.0).await
}

pub async fn enroll_student(
    req: HttpRequest,
    actor: Actor,
    course_id: SafeCourseId,
    enroll_data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .enroll_student(&req, actor, course_id.0, enroll_data.into_inner())
        .await
}

pub async fn list_enrollments(
    req: HttpRequest,
    actor: Actor,
    course_id: SafeCourseId,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .list_enrollments(&req, actor, course_id.0)
        .await
}

pub async fn list_modules(
    req: HttpRequest,
    actor: Actor,
    course_id: SafeCourseId,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE.list_modules(&req, actor, course_id.0).await
}

pub async fn create_module(
    req: HttpRequest,
    actor: Actor,
    course_id: SafeCourseId,
    module_data: web::Json<CreateModuleRequest>,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE
        .create_module(&req, actor, course_id.0, module_data.into_inner())
        .await
}

pub async fn reorder_modules(
    req: HttpRequest,
    actor: Actor,
    course_id: SafeCourseId,
    reorder_data: web::Json<ReorderModulesRequest>,
) -> ActixResult<HttpResponse> {
    MODULE_SERVICE
        .reorder_modules(&req, actor, course_id.0, reorder_data.into_inner())
        .await
}

pub async fn list_assignments(
    req: HttpRequest,
    actor: Actor,
    course_id: SafeCourseId,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, actor, course_id.0)
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    actor: Actor,
    course_id: SafeCourseId,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, actor, course_id.0, assignment_data.into_inner())
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    // 创建课程 - 仅教师
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                    ),
            )
            // 必须在 /{course_id} 之前注册
            .service(web::resource("/me").route(web::get().to(list_my_courses)))
            .service(web::resource("/{course_id}").route(web::get().to(get_course)))
            .service(
                web::resource("/{course_id}/enroll").route(
                    web::post()
                        .to(enroll_student)
                        .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{course_id}/enrollments").route(
                    web::get()
                        .to(list_enrollments)
                        .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{course_id}/modules")
                    // 模块列表 - 所有者或已选课学生（业务层检查）
                    .route(web::get().to(list_modules))
                    .route(
                        web::post()
                            .to(create_module)
                            .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                    ),
            )
            .service(
                web::resource("/{course_id}/modules/reorder").route(
                    web::patch()
                        .to(reorder_modules)
                        .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{course_id}/assignments")
                    .route(web::get().to(list_assignments))
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                    ),
            ),
    );
}
