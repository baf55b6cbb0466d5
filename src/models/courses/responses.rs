use serde::Serialize;

use crate::models::assignments::entities::Assignment;
use crate::models::courses::entities::Course;
use crate::models::modules::entities::Module;

// 当前用户相关的课程（任教 + 已选）
#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub taught: Vec<Course>,
    pub enrolled: Vec<Course>,
}

#[derive(Debug, Serialize)]
pub struct MyCoursesResponse {
    pub courses: Vec<Course>,
}

// 课程详情，附带模块与作业
#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<Module>,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Serialize)]
pub struct EnrolledStudent {
    pub id: i64,
    pub email: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentListResponse {
    pub students: Vec<EnrolledStudent>,
}
