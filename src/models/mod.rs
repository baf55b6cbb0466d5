//! 数据模型定义
//!
//! 业务实体、请求体与响应体，与 `entity` 中的 SeaORM 模型分离。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod modules;
pub mod submissions;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use common::{ApiResponse, ErrorCode};
