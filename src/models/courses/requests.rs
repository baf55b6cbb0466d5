use serde::Deserialize;

// 创建课程请求
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
}

// 选课请求：按学生邮箱查找
#[derive(Debug, Deserialize)]
pub struct EnrollStudentRequest {
    pub student_email: String,
}
