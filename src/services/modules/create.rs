use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ModuleService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::modules::{entities::Module, requests::CreateModuleRequest};
use crate::policy::{AccessPolicy, Actor};
use crate::services::error_response;
use crate::utils::validate::validate_required;

pub async fn create_module(
    service: &ModuleService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
    module_data: CreateModuleRequest,
) -> ActixResult<HttpResponse> {
    match try_create_module(service, request, actor, course_id, module_data).await {
        Ok(module) => Ok(HttpResponse::Created().json(ApiResponse::success(module, "Module created"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn try_create_module(
    service: &ModuleService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
    module_data: CreateModuleRequest,
) -> Result<Module> {
    validate_required(&module_data.title, "Title is required").map_err(LmsError::validation)?;

    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_manage_modules(&actor, course_id)
        .await?
        .into_result()?;

    storage
        .create_module(course_id, module_data.title.trim())
        .await
}
