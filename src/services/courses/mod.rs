pub mod create;
pub mod detail;
pub mod enroll;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::requests::{CreateCourseRequest, EnrollStudentRequest};
use crate::policy::Actor;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 创建课程
    pub async fn create_course(
        &self,
        request: &HttpRequest,
        actor: Actor,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, actor, course_data).await
    }

    // 任教 + 已选课程
    pub async fn list_courses(&self, request: &HttpRequest, actor: Actor) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, actor).await
    }

    // 按角色返回我的课程
    pub async fn list_my_courses(
        &self,
        request: &HttpRequest,
        actor: Actor,
    ) -> ActixResult<HttpResponse> {
        list::list_my_courses(self, request, actor).await
    }

    // 课程详情
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        actor: Actor,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_course(self, request, actor, course_id).await
    }

    // 添加学生
    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        actor: Actor,
        course_id: i64,
        enroll_data: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_student(self, request, actor, course_id, enroll_data).await
    }

    // 学生名单
    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        actor: Actor,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        enroll::list_enrollments(self, request, actor, course_id).await
    }
}
