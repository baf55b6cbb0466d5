use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ModuleService;
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::modules::{requests::ReorderModulesRequest, responses::ModuleListResponse};
use crate::policy::{AccessPolicy, Actor};
use crate::services::error_response;
use crate::utils::validate::validate_module_ids;

pub async fn reorder_modules(
    service: &ModuleService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
    reorder_data: ReorderModulesRequest,
) -> ActixResult<HttpResponse> {
    match try_reorder(service, request, actor, course_id, reorder_data).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "Modules reordered"))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn try_reorder(
    service: &ModuleService,
    request: &HttpRequest,
    actor: Actor,
    course_id: i64,
    reorder_data: ReorderModulesRequest,
) -> Result<ModuleListResponse> {
    let ids = reorder_data.module_ids_in_order;
    validate_module_ids(&ids).map_err(LmsError::validation)?;

    let storage = service.get_storage(request)?;
    AccessPolicy::new(storage.as_ref())
        .can_manage_modules(&actor, course_id)
        .await?
        .into_result()?;

    // 校验与更新在同一事务中
    let modules = storage.apply_module_order_atomically(course_id, &ids).await?;
    info!("Course {} modules reordered by {}", course_id, actor.id);
    Ok(ModuleListResponse { modules })
}
