use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::LmsError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginResponse, RegisterRequest},
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::services::error_response;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let email = register_request.email.trim().to_string();

    // 验证邮箱格式
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 验证密码长度
    if let Err(msg) = validate_password(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Server error",
                )),
            );
        }
    };

    let create = CreateUserRequest {
        email,
        password_hash,
        role: register_request.role.unwrap_or(UserRole::Student),
    };

    let user = match storage.create_user(create).await {
        Ok(user) => user,
        Err(LmsError::Conflict(msg)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                msg,
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    match JwtUtils::generate_access_token(user.id, user.role) {
        Ok(access_token) => {
            tracing::info!("User {} registered as {}", user.id, user.role);
            let response = LoginResponse {
                access_token,
                expires_in: JwtUtils::access_token_ttl(),
                user,
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(response, "Registered")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Server error",
                )),
            )
        }
    }
}
