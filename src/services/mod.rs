pub mod assignments;
pub mod auth;
pub mod courses;
pub mod modules;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use modules::ModuleService;
pub use submissions::SubmissionService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::error;

use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::storage::Storage;

/// 错误转换为统一响应
///
/// 基础设施错误只返回通用信息，详情写入日志。
pub fn error_response(err: &LmsError) -> HttpResponse {
    if err.is_internal() {
        error!("{}", err.format_simple());
    }
    HttpResponse::build(err.status_code()).json(ApiResponse::error_empty(
        err.error_code(),
        err.public_message(),
    ))
}

// 从 app data 中获取存储
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| LmsError::database_config("Storage not found in app data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_internal_error_is_opaque() {
        let resp = error_response(&LmsError::database_operation("disk I/O error"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_policy_errors_keep_status() {
        assert_eq!(
            error_response(&LmsError::not_found("Course not found")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(&LmsError::forbidden("Forbidden")).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            error_response(&LmsError::conflict("mismatch")).status(),
            StatusCode::CONFLICT
        );
    }
}
