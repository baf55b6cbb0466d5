pub mod create;
pub mod list;
pub mod reorder;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::modules::requests::{CreateModuleRequest, ReorderModulesRequest};
use crate::policy::Actor;
use crate::storage::Storage;

pub struct ModuleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ModuleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_module(
        &self,
        request: &HttpRequest,
        actor: Actor,
        course_id: i64,
        module_data: CreateModuleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_module(self, request, actor, course_id, module_data).await
    }

    pub async fn list_modules(
        &self,
        request: &HttpRequest,
        actor: Actor,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_modules(self, request, actor, course_id).await
    }

    pub async fn reorder_modules(
        &self,
        request: &HttpRequest,
        actor: Actor,
        course_id: i64,
        reorder_data: ReorderModulesRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_modules(self, request, actor, course_id, reorder_data).await
    }
}
