pub mod create;
pub mod get;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::policy::Actor;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        actor: Actor,
        course_id: i64,
        assignment_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, actor, course_id, assignment_data).await
    }

    // 课程作业列表
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        actor: Actor,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::list_assignments(self, request, actor, course_id).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        actor: Actor,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_assignment(self, request, actor, assignment_id).await
    }
}
