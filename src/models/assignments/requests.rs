use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 创建作业请求
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub instructions: Option<String>,
    pub due_at: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub points: Option<i32>,
}
