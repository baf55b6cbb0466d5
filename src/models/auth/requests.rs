use serde::Deserialize;

use crate::models::users::entities::UserRole;

// 用户注册请求
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// 缺省为学生
    pub role: Option<UserRole>,
}

// 用户登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
