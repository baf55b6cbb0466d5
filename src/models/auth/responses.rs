use crate::models::users::entities::User;
use serde::Serialize;

// 登录/注册响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub expires_in: i64, // 秒
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
}
