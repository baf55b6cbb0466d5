//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则在查找资源之前直接返回 400。
//! 认证中间件先于提取器执行，未认证请求仍然先得到 401。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(raw: Option<&str>) -> Option<i64> {
    raw?.parse::<i64>().ok().filter(|id| *id > 0)
}

fn bad_request(message: &'static str) -> actix_web::Error {
    InternalError::from_response(
        message,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

macro_rules! define_safe_ids {
    ($(
        $name:ident($param:literal, $message:literal)
    ),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(
                        parse_positive_id(req.match_info().get($param))
                            .map($name)
                            .ok_or_else(|| bad_request($message)),
                    )
                }
            }
        )*
    };
}

define_safe_ids! {
    SafeCourseId("course_id", "Invalid courseId"),
    SafeAssignmentId("assignment_id", "Invalid assignmentId"),
    SafeSubmissionId("submission_id", "Invalid submissionId"),
}
