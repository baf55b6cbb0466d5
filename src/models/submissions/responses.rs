use serde::Serialize;

use crate::models::submissions::entities::Submission;

// 提交者信息
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionStudent {
    pub id: i64,
    pub email: String,
}

// 教师视角的提交列表项
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionListItem {
    pub id: i64,
    pub content: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub grade: Option<i32>,
    pub feedback: Option<String>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub student: SubmissionStudent,
}

#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub submissions: Vec<SubmissionListItem>,
}

// 尚未提交时 submission 为 null
#[derive(Debug, Serialize)]
pub struct MySubmissionResponse {
    pub submission: Option<Submission>,
}
