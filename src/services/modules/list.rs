use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ModuleService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::modules::responses::ModuleListResponse;
use crate::policy::{AccessPolicy, Actor};
use crate::services::error_response;

pub async fn list_modules(
    service: &ModuleService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    match load_modules(service, request, actor, course_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Modules retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn load_modules(
    service: &ModuleService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
) -> Result<ModuleListResponse> {
    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_read_modules(&actor, course_id)
        .await?
        .into_result()?;

    let modules = storage.list_modules(course_id).await?;
    Ok(ModuleListResponse { modules })
}
