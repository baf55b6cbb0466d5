use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubmitAssignmentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct GradeSubmissionRequest {
    pub grade: i32,
    pub feedback: Option<String>,
}
