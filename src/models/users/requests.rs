use crate::models::users::entities::UserRole;

// 创建用户（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}
