use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    // 课程内从 1 开始的连续排序
    pub order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
