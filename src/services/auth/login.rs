use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::services::error_response;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Invalid credentials",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    // 1. 根据邮箱获取用户信息
    let user = match storage
        .get_user_by_email(login_request.email.trim())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => return Ok(error_response(&e)),
    };

    // 2. 验证密码，未知邮箱与错误密码返回相同信息
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(invalid_credentials());
    }

    // 3. 生成令牌
    match JwtUtils::generate_access_token(user.id, user.role) {
        Ok(access_token) => {
            tracing::info!("User {} logged in successfully", user.id);

            let response = LoginResponse {
                access_token,
                expires_in: JwtUtils::access_token_ttl(),
                user,
            };

            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
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
